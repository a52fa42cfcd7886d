// Score submission: fire-and-forget, failures are logged and dropped

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    pub success: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("Score submission rejected: {0}")]
    Rejected(String),
}

/// Receives the final score when the player wins a round.
pub trait ScoreSink {
    fn submit(&mut self, record: ScoreRecord) -> Result<Ack, ScoreError>;
}

/// Default sink: writes the record to the log and acknowledges it.
#[derive(Debug, Default)]
pub struct LogScoreSink;

impl ScoreSink for LogScoreSink {
    fn submit(&mut self, record: ScoreRecord) -> Result<Ack, ScoreError> {
        log::info!("Submitting score: {} = {}", record.name, record.score);
        Ok(Ack { success: true })
    }
}

/// Hands a record to the sink without surfacing the outcome.
pub fn submit_quietly(sink: &mut dyn ScoreSink, record: ScoreRecord) {
    match sink.submit(record) {
        Ok(ack) if !ack.success => log::warn!("Score sink returned an unsuccessful ack"),
        Ok(_) => {}
        Err(e) => log::warn!("{}", e),
    }
}
