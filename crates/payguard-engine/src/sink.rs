//! Verdict output channels.

use std::io::{self, Write};

use crate::{Feature, TokenStyle, Verdict};

/// Destination for verdicts, one logical channel per feature.
pub trait VerdictSink {
    /// Emit one verdict on `feature`'s channel.
    fn emit(&mut self, feature: Feature, verdict: Verdict) -> io::Result<()>;

    /// Flush buffered output. Called once after the stream ends.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Collects verdicts in memory.
impl VerdictSink for Vec<(Feature, Verdict)> {
    fn emit(&mut self, feature: Feature, verdict: Verdict) -> io::Result<()> {
        self.push((feature, verdict));
        Ok(())
    }
}

/// Three independent writers, one token per line.
#[derive(Debug)]
pub struct ChannelWriters<W> {
    channels: [W; 3],
    style: TokenStyle,
}

impl<W: Write> ChannelWriters<W> {
    /// Writers for features 1, 2 and 3, in that order.
    pub fn new(channels: [W; 3], style: TokenStyle) -> Self {
        Self { channels, style }
    }

    /// Recover the writers.
    pub fn into_inner(self) -> [W; 3] {
        self.channels
    }
}

impl<W: Write> VerdictSink for ChannelWriters<W> {
    fn emit(&mut self, feature: Feature, verdict: Verdict) -> io::Result<()> {
        writeln!(self.channels[feature.slot()], "{}", verdict.as_token(self.style))
    }

    fn flush(&mut self) -> io::Result<()> {
        for channel in &mut self.channels {
            channel.flush()?;
        }
        Ok(())
    }
}
