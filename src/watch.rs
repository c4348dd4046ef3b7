//! Wall clock timing of the phases of a run.

use std::fmt;
use std::time::{Duration, Instant};

/// A stopwatch that can be started and stopped repeatedly, accumulating the elapsed time.
#[derive(Clone, Debug, Default)]
pub struct Stopwatch {
    elapsed: Duration,
    started: Option<Instant>,
}

impl Stopwatch {
    pub fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    pub fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed += started.elapsed();
        }
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Total time spent running, including the current lap.
    pub fn elapsed(&self) -> Duration {
        match self.started {
            Some(started) => self.elapsed + started.elapsed(),
            None => self.elapsed,
        }
    }
}

/// Timers for the program as a whole and its individual phases.
#[derive(Clone, Debug, Default)]
pub struct ExecutionWatch {
    pub all_program: Stopwatch,
    pub input_check: Stopwatch,
    pub input_preparation: Stopwatch,
    pub sequential_algorithm: Stopwatch,
    pub parallel_algorithm: Stopwatch,
}

impl ExecutionWatch {
    pub fn new() -> ExecutionWatch {
        ExecutionWatch::default()
    }

    pub fn stop_all(&mut self) {
        self.all_program.stop();
        self.input_check.stop();
        self.input_preparation.stop();
        self.sequential_algorithm.stop();
        self.parallel_algorithm.stop();
    }
}

impl fmt::Display for ExecutionWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timers = [
            ("AllProgram", &self.all_program),
            ("InputCheck", &self.input_check),
            ("InputPreparation", &self.input_preparation),
            ("SequentialAlgorithm", &self.sequential_algorithm),
            ("ParallelAlgorithm", &self.parallel_algorithm),
        ];

        for (name, timer) in timers.iter() {
            writeln!(f, "Execution time [{}]: {} seconds", name, timer.elapsed().as_secs_f64())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn accumulates_laps() {
        let mut watch = Stopwatch::default();

        watch.start();
        thread::sleep(Duration::from_millis(5));
        watch.stop();
        let first = watch.elapsed();
        assert!(first >= Duration::from_millis(5));

        // stopped watches do not advance
        thread::sleep(Duration::from_millis(5));
        assert_eq!(watch.elapsed(), first);

        watch.start();
        thread::sleep(Duration::from_millis(5));
        watch.stop();
        assert!(watch.elapsed() >= first + Duration::from_millis(5));
        assert!(!watch.is_running());
    }

    #[test]
    fn stop_all_halts_everything() {
        let mut watch = ExecutionWatch::new();
        watch.all_program.start();
        watch.parallel_algorithm.start();
        watch.stop_all();

        assert!(!watch.all_program.is_running());
        assert!(!watch.parallel_algorithm.is_running());
        assert_eq!(watch.to_string().lines().count(), 5);
        assert!(watch.to_string().starts_with("Execution time [AllProgram]: "));
    }
}
