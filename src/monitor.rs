//! System snapshot for the `monitor` command: CPU, memory, root disk and the
//! processes using the most memory.

use std::time::Duration;

use sysinfo::{CpuExt, DiskExt, ProcessExt, System, SystemExt};

/// How many processes the report lists
pub const TOP_PROCESSES: usize = 5;

const MB: u64 = 1024 * 1024;
const GB: u64 = 1024 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSample {
    pub pid: String,
    pub name: String,
    pub memory_percent: f64,
    pub cpu_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiskSample {
    pub percent: f64,
    pub free: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemSnapshot {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub memory_available: u64,
    pub disk: Option<DiskSample>,
    pub processes: Vec<ProcessSample>,
}

impl SystemSnapshot {
    /// Sample the running system. CPU usage needs two refreshes a short
    /// interval apart.
    pub fn capture() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu();
        std::thread::sleep(Duration::from_millis(100));
        sys.refresh_cpu();
        sys.refresh_memory();
        sys.refresh_disks_list();
        sys.refresh_disks();
        sys.refresh_processes();

        let total = sys.total_memory();
        let memory_percent = percent(total.saturating_sub(sys.available_memory()), total);

        let disk = sys
            .disks()
            .iter()
            .find(|d| d.mount_point() == std::path::Path::new("/"))
            .or_else(|| sys.disks().first())
            .map(|d| DiskSample {
                percent: percent(d.total_space().saturating_sub(d.available_space()), d.total_space()),
                free: d.available_space(),
            });

        let mut processes: Vec<ProcessSample> = sys
            .processes()
            .values()
            .map(|p| ProcessSample {
                pid: p.pid().to_string(),
                name: p.name().to_string(),
                memory_percent: percent(p.memory(), total),
                cpu_percent: f64::from(p.cpu_usage()),
            })
            .collect();
        processes.sort_by(|a, b| b.memory_percent.total_cmp(&a.memory_percent));
        processes.truncate(TOP_PROCESSES);

        Self {
            cpu_percent: f64::from(sys.global_cpu_info().cpu_usage()),
            memory_percent,
            memory_available: sys.available_memory(),
            disk,
            processes,
        }
    }

    pub fn render(&self) -> String {
        let mut lines = vec![
            "System Monitor".to_string(),
            "==============".to_string(),
            format!("CPU Usage: {:.1}%", self.cpu_percent),
            format!(
                "Memory: {:.1}% used ({} MB available)",
                self.memory_percent,
                self.memory_available / MB
            ),
            match &self.disk {
                Some(d) => format!("Disk: {:.1}% used ({} GB free)", d.percent, d.free / GB),
                None => "Disk: unavailable".to_string(),
            },
            String::new(),
            "Top Processes:".to_string(),
            "PID\tName\t\tMemory %\tCPU %".to_string(),
        ];

        for p in &self.processes {
            let name: String = p.name.chars().take(15).collect();
            lines.push(format!(
                "{}\t{}\t{:.1}%\t\t{:.1}%",
                p.pid, name, p.memory_percent, p.cpu_percent
            ));
        }
        lines.join("\n")
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
