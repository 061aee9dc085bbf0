use std::fmt::Display;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Line-oriented sink for readings and start-up messages.
///
/// Each line is prefixed with the milliseconds elapsed since the publisher
/// was created, right-aligned in ten columns.
pub struct Publisher<W> {
    out: W,
    start: Instant,
}

impl<W> Publisher<W>
where
    W: Write,
{
    pub fn new(out: W) -> Self {
        Publisher {
            out,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn publish<D: Display>(&mut self, payload: D) -> io::Result<()> {
        let now = self.elapsed();
        self.publish_at(now, payload)
    }

    fn publish_at<D: Display>(&mut self, now: Duration, payload: D) -> io::Result<()> {
        writeln!(self.out, "{:>10} {}", now.as_millis(), payload)?;
        self.out.flush()
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

/// Lets a display through only once more than `rate` has passed since the
/// last one. The first display always goes through.
pub struct Throttle {
    rate: Duration,
    last: Option<Duration>,
}

impl Throttle {
    pub fn new(rate: Duration) -> Self {
        Throttle { rate, last: None }
    }

    pub fn ready(&mut self, now: Duration) -> bool {
        match self.last {
            Some(last) if now.saturating_sub(last) <= self.rate => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_format() {
        let mut publisher = Publisher::new(Vec::new());

        publisher.publish_at(Duration::from_millis(1234), "Started setup...").unwrap();
        publisher.publish_at(Duration::from_millis(4_294_967_295), 76).unwrap();

        let out = String::from_utf8(publisher.into_inner()).unwrap();
        assert_eq!(out, "      1234 Started setup...\n4294967295 76\n");
    }

    #[test]
    fn throttle() {
        let mut throttle = Throttle::new(Duration::from_millis(150));

        assert!(throttle.ready(Duration::from_millis(10)));
        assert!(!throttle.ready(Duration::from_millis(100)));
        assert!(!throttle.ready(Duration::from_millis(160)));
        assert!(throttle.ready(Duration::from_millis(161)));
        assert!(throttle.ready(Duration::from_millis(2161)));
    }
}
