// Derived host metrics: total/free CPU (MHz) and free memory (bytes)

use crate::models::HostSummary;
use crate::units::ByteSize;

const MIB: i128 = 1024 * 1024;

/// Values shown in one host row. Free figures are signed: an over-subscribed
/// host reports negative free CPU or memory. Derived figures are `i128` so
/// any pair of `i64` inputs gives the exact result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostMetrics {
    pub used_cpu_mhz: i64,
    pub total_cpu_mhz: i128,
    pub free_cpu_mhz: i128,
    pub used_memory: ByteSize,
    pub total_memory: ByteSize,
    pub free_memory: ByteSize,
}

/// Clock speed times core count. Zero cores or zero clock yields zero.
pub fn total_cpu_mhz(cpu_mhz: i64, num_cpu_cores: i64) -> i128 {
    i128::from(cpu_mhz) * i128::from(num_cpu_cores)
}

pub fn mib_to_bytes(mib: i64) -> i128 {
    i128::from(mib) * MIB
}

pub fn host_metrics(host: &HostSummary) -> HostMetrics {
    let hardware = &host.hardware;
    let stats = &host.quick_stats;

    let total_cpu = total_cpu_mhz(hardware.cpu_mhz, hardware.num_cpu_cores);
    let free_cpu = total_cpu - i128::from(stats.overall_cpu_usage);

    let used_memory = mib_to_bytes(stats.overall_memory_usage);
    let total_memory = i128::from(hardware.memory_size);
    let free_memory = total_memory - used_memory;

    HostMetrics {
        used_cpu_mhz: stats.overall_cpu_usage,
        total_cpu_mhz: total_cpu,
        free_cpu_mhz: free_cpu,
        used_memory: ByteSize(used_memory),
        total_memory: ByteSize(total_memory),
        free_memory: ByteSize(free_memory),
    }
}
