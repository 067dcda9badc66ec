#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};
#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Rolling frame statistics for the on-screen overlay. Purely observational.
pub struct FrameStats {
    window_start: Option<Instant>,
    frames_in_window: u32,
    last_frame: Option<Instant>,
    fps: f32,
    frame_ms: f32,
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            window_start: None,
            frames_in_window: 0,
            last_frame: None,
            fps: 0.0,
            frame_ms: 0.0,
        }
    }

    /// Records that a frame was just presented.
    pub fn frame_rendered(&mut self) {
        let now = Instant::now();

        if let Some(last_frame) = self.last_frame {
            self.frame_ms = (now - last_frame).as_secs_f32() * 1000.0;
        }
        self.last_frame = Some(now);

        self.frames_in_window += 1;
        match self.window_start {
            Some(window_start) if now - window_start >= FPS_WINDOW => {
                self.fps = self.frames_in_window as f32 / (now - window_start).as_secs_f32();
                self.window_start = Some(now);
                self.frames_in_window = 0;
            }
            Some(_) => {}
            None => self.window_start = Some(now),
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_ms(&self) -> f32 {
        self.frame_ms
    }

    pub fn overlay_text(&self) -> String {
        format!("{:>3.0} FPS {:>6.1} MS", self.fps, self.frame_ms)
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_time_is_measured_between_frames() {
        let mut stats = FrameStats::new();

        stats.frame_rendered();
        assert_eq!(stats.frame_ms(), 0.0);

        stats.frame_rendered();
        assert!(stats.frame_ms() >= 0.0);
    }

    #[test]
    fn overlay_text_shows_both_counters() {
        let stats = FrameStats::new();

        let text = stats.overlay_text();

        assert!(text.contains("FPS"));
        assert!(text.contains("MS"));
    }
}
