//! Frame-rate monitor driven by the visualization clock.

use std::collections::VecDeque;

/// Frame times kept for the rolling average
const WINDOW: usize = 60;

/// Seconds between reports
const REPORT_INTERVAL_S: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct FpsMonitor {
    frame_times: VecDeque<f64>,
    last_frame_s: Option<f64>,
    last_report_s: f64,
}

impl Default for FpsMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsMonitor {
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(WINDOW + 1),
            last_frame_s: None,
            last_report_s: 0.0,
        }
    }

    /// Record a frame at `now_s`. Returns the rolling FPS once per second.
    pub fn record_frame(&mut self, now_s: f64) -> Option<f32> {
        if let Some(last) = self.last_frame_s {
            self.frame_times.push_back((now_s - last).max(0.0));
            if self.frame_times.len() > WINDOW {
                self.frame_times.pop_front();
            }
        } else {
            self.last_report_s = now_s;
        }
        self.last_frame_s = Some(now_s);

        if now_s - self.last_report_s >= REPORT_INTERVAL_S {
            self.last_report_s = now_s;
            return Some(self.current_fps());
        }
        None
    }

    pub fn current_fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }

        let total: f64 = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as f64;

        if avg_frame_time > 0.0 {
            (1.0 / avg_frame_time) as f32
        } else {
            0.0
        }
    }
}
