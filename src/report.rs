// Report sections: title, separator and a column-aligned table per object kind

use crate::inventory::Inventory;
use crate::units::ByteSize;
use std::io::{self, Write};
use tabled::settings::object::Segment;
use tabled::settings::{Modify, Padding, Style};
use tabled::{Table, Tabled};

#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct HostRow {
    #[tabled(rename = "Name:")]
    pub name: String,
    #[tabled(rename = "Used CPU:")]
    pub used_cpu: i64,
    #[tabled(rename = "Total CPU:")]
    pub total_cpu: i128,
    #[tabled(rename = "Free CPU:")]
    pub free_cpu: i128,
    #[tabled(rename = "Used Memory:")]
    pub used_memory: ByteSize,
    #[tabled(rename = "Total Memory:")]
    pub total_memory: ByteSize,
    #[tabled(rename = "Free Memory:")]
    pub free_memory: ByteSize,
}

#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct DatastoreRow {
    #[tabled(rename = "Name:")]
    pub name: String,
    #[tabled(rename = "Type:")]
    pub type_: String,
    #[tabled(rename = "Capacity:")]
    pub capacity: ByteSize,
    #[tabled(rename = "Free:")]
    pub free: ByteSize,
}

#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct VmRow {
    #[tabled(rename = "Name:")]
    pub name: String,
    #[tabled(rename = "Guest Full Name:")]
    pub guest_full_name: String,
}

/// Writes one section per kind to `out` as soon as the kind completes.
pub struct Report<W> {
    out: W,
    sections: usize,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out, sections: 0 }
    }

    pub fn write_section<K: Inventory>(&mut self, items: &[K]) -> io::Result<()> {
        self.out.write_all(render_section(items).as_bytes())?;
        self.out.flush()?;
        self.sections += 1;
        Ok(())
    }

    /// Sections written so far.
    pub fn sections(&self) -> usize {
        self.sections
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Renders `items` in the given order. Columns are separated by two spaces,
/// like a tab writer with padding 2.
pub fn render_section<K: Inventory>(items: &[K]) -> String {
    let title = format!("*** {} Information ***", K::KIND.title());
    let separator = "-".repeat(title.len());

    let mut table = Table::new(items.iter().map(K::row));
    table
        .with(Style::empty())
        .with(Modify::new(Segment::all()).with(Padding::new(0, 2, 0, 0)));

    format!("\n{title}\n{separator}\n\n{table}\n")
}
