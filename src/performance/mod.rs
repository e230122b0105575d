//! # Frame Statistics
//!
//! A small rolling window of frame durations, summarised as FPS and frame
//! time and drawn as a compact corner widget.
//!
//! ```rust
//! use std::time::Duration;
//! use trundle::performance::PerformanceMonitor;
//!
//! let mut monitor = PerformanceMonitor::new();
//! monitor.record_frame(Duration::from_millis(16));
//! // monitor.render_overlay(ui);
//! ```

use std::collections::VecDeque;
use std::time::Duration;

/// Summary of the recent frame window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceMetrics {
    pub fps: f32,
    /// Average frame time in milliseconds
    pub frame_time_ms: f32,
    pub min_frame_time_ms: f32,
    pub max_frame_time_ms: f32,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: 0.0,
            max_frame_time_ms: 0.0,
        }
    }
}

pub struct PerformanceMonitor {
    /// Ring buffer of recent frame times
    frame_times: VecDeque<Duration>,
    max_samples: usize,
    current_metrics: PerformanceMetrics,
    /// Frame time accumulated since the metrics were last recomputed
    since_update: Duration,
    update_interval: Duration,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::with_capacity(120)
    }

    pub fn with_capacity(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples,
            current_metrics: PerformanceMetrics::default(),
            since_update: Duration::ZERO,
            // Refresh a few times per second
            update_interval: Duration::from_millis(250),
        }
    }

    /// Adds one frame's duration and refreshes the summary when due.
    pub fn record_frame(&mut self, frame_time: Duration) {
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);

        self.since_update += frame_time;
        if self.since_update >= self.update_interval || self.current_metrics.fps == 0.0 {
            self.update_metrics();
            self.since_update = Duration::ZERO;
        }
    }

    fn update_metrics(&mut self) {
        if self.frame_times.is_empty() {
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_ms = total.as_secs_f32() * 1000.0 / self.frame_times.len() as f32;

        self.current_metrics.frame_time_ms = avg_ms;
        self.current_metrics.fps = if avg_ms > 0.0 { 1000.0 / avg_ms } else { 0.0 };

        if let (Some(min), Some(max)) = (self.frame_times.iter().min(), self.frame_times.iter().max()) {
            self.current_metrics.min_frame_time_ms = min.as_secs_f32() * 1000.0;
            self.current_metrics.max_frame_time_ms = max.as_secs_f32() * 1000.0;
        }
    }

    pub fn get_metrics(&self) -> &PerformanceMetrics {
        &self.current_metrics
    }

    /// Frame times in milliseconds, oldest first
    pub fn get_frame_time_history(&self) -> Vec<f32> {
        self.frame_times
            .iter()
            .map(|duration| duration.as_secs_f32() * 1000.0)
            .collect()
    }

    pub fn reset(&mut self) {
        self.frame_times.clear();
        self.current_metrics = PerformanceMetrics::default();
        self.since_update = Duration::ZERO;
    }

    /// Compact top-left widget with FPS, frame time and a history graph
    pub fn render_overlay(&self, ui: &imgui::Ui) {
        let metrics = &self.current_metrics;

        ui.window("Stats")
            .size([140.0, 92.0], imgui::Condition::Always)
            .position([10.0, 10.0], imgui::Condition::Always)
            .no_decoration()
            .no_inputs()
            .bg_alpha(0.4)
            .build(|| {
                ui.text(format!("{:.0} FPS", metrics.fps));
                ui.text(format!(
                    "{:.1} ms ({:.1}-{:.1})",
                    metrics.frame_time_ms, metrics.min_frame_time_ms, metrics.max_frame_time_ms
                ));
                let history = self.get_frame_time_history();
                if !history.is_empty() {
                    ui.plot_lines("##frame_times", &history)
                        .graph_size([124.0, 32.0])
                        .scale_min(0.0)
                        .scale_max(50.0)
                        .build();
                }
            });
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_populates_metrics() {
        let mut monitor = PerformanceMonitor::new();
        monitor.record_frame(Duration::from_millis(20));
        let metrics = monitor.get_metrics();
        assert!((metrics.fps - 50.0).abs() < 0.01);
        assert!((metrics.frame_time_ms - 20.0).abs() < 0.01);
    }

    #[test]
    fn window_drops_oldest_samples() {
        let mut monitor = PerformanceMonitor::with_capacity(3);
        for ms in [900, 300, 300, 300] {
            monitor.record_frame(Duration::from_millis(ms));
        }
        assert_eq!(monitor.get_frame_time_history().len(), 3);
        let metrics = monitor.get_metrics();
        assert!((metrics.max_frame_time_ms - 300.0).abs() < 0.01);
        assert!((metrics.frame_time_ms - 300.0).abs() < 0.01);
    }

    #[test]
    fn reset_clears_history() {
        let mut monitor = PerformanceMonitor::new();
        monitor.record_frame(Duration::from_millis(16));
        monitor.reset();
        assert!(monitor.get_frame_time_history().is_empty());
        assert_eq!(*monitor.get_metrics(), PerformanceMetrics::default());
    }
}
