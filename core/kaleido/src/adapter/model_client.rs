//! LlmDriver を ModelClient として使うアダプタ

use crate::ports::outbound::ModelClient;
use common::error::Error;
use common::llm::{AnyProvider, LlmDriver, LlmProvider};

pub struct DriverModelClient {
    driver: LlmDriver<AnyProvider>,
}

impl DriverModelClient {
    pub fn new(driver: LlmDriver<AnyProvider>) -> Self {
        Self { driver }
    }
}

impl ModelClient for DriverModelClient {
    fn name(&self) -> &str {
        self.driver.provider().name()
    }

    fn generate(&self, prompt: &str) -> Result<String, Error> {
        self.driver.query(prompt)
    }
}
