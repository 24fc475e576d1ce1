use std::time::{Duration, Instant};

/// Per-session stats shown in the header
pub struct GameMetrics {
    start_time: Instant,
    elapsed_time: Duration,
    high_score: u32,
    games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Refresh the game clock; frozen once the game has ended
    pub fn update(&mut self, playing: bool) {
        if playing {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_time
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.high_score(), 10);
        assert_eq!(metrics.games_played(), 1);

        metrics.on_game_over(5);
        assert_eq!(metrics.high_score(), 10);
        assert_eq!(metrics.games_played(), 2);
    }

    #[test]
    fn test_clock_freezes_after_game_over() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(42);

        metrics.update(false);
        assert_eq!(metrics.elapsed(), Duration::from_secs(42));

        metrics.on_game_start();
        metrics.update(true);
        assert!(metrics.elapsed() < Duration::from_secs(1));
    }
}
