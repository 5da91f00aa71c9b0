//! Terminal alert adapter

use std::io::Write;

use async_trait::async_trait;
use colored::Colorize;

use crate::application::ports::{AlertError, Alerter};

/// Prints alerts to stderr
#[derive(Debug, Default)]
pub struct ConsoleAlerter;

impl ConsoleAlerter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Alerter for ConsoleAlerter {
    async fn alert(&self, message: &str) -> Result<(), AlertError> {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{} {}", "!".red().bold(), message.red())
            .map_err(|e| AlertError::SendFailed(e.to_string()))
    }
}
