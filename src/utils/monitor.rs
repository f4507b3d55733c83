#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub phase_time: Duration,
    pub elapsed_time: Duration,
}

/// 記錄每個生成階段的耗時與記憶體用量 (`--monitor`)
#[cfg(feature = "cli")]
pub struct RunMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    start_time: Instant,
    last_phase: Mutex<Instant>,
    peak_memory: Mutex<u64>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl RunMonitor {
    pub fn new(enabled: bool) -> Self {
        let system = if enabled {
            let mut system = System::new_with_specifics(RefreshKind::everything());
            system.refresh_all();
            system
        } else {
            System::new()
        };

        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                if enabled {
                    tracing::warn!("Cannot resolve current PID, memory stats disabled: {}", e);
                }
                None
            }
        };

        let now = Instant::now();
        Self {
            system: Mutex::new(system),
            pid,
            start_time: now,
            last_phase: Mutex::new(now),
            peak_memory: Mutex::new(0),
            enabled,
        }
    }

    fn sample(&self) -> Option<PhaseStats> {
        if !self.enabled {
            return None;
        }

        let memory_mb = match self.pid {
            Some(pid) => {
                let mut system = self.system.lock().ok()?;
                system.refresh_all();
                system.process(pid).map(|p| p.memory() / 1024 / 1024).unwrap_or(0)
            }
            None => 0,
        };

        let mut peak = self.peak_memory.lock().ok()?;
        if memory_mb > *peak {
            *peak = memory_mb;
        }

        let mut last = self.last_phase.lock().ok()?;
        let phase_time = last.elapsed();
        *last = Instant::now();

        Some(PhaseStats {
            memory_usage_mb: memory_mb,
            peak_memory_mb: *peak,
            phase_time,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_phase(&self, phase: &str, items: usize) {
        if let Some(stats) = self.sample() {
            tracing::info!(
                "📊 {} - items: {}, took {:?}, memory: {}MB (peak {}MB)",
                phase,
                items,
                stats.phase_time,
                stats.memory_usage_mb,
                stats.peak_memory_mb
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.sample() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed_time,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for RunMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 非 CLI 環境 (沒有 sysinfo) 的空實現
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct RunMonitor;

#[cfg(not(feature = "cli"))]
impl RunMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_phase(&self, _phase: &str, _items: usize) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
