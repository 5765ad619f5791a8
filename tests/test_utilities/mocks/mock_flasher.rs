use idf_artifact_flash::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock FirmwareFlasher recording every job instead of running idf.py
#[derive(Default, Clone)]
pub struct MockFlasher {
    pub jobs: Arc<Mutex<Vec<FlashJob>>>,
    pub monitored_ports: Arc<Mutex<Vec<String>>>,
}

impl MockFlasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jobs(&self) -> Vec<FlashJob> {
        self.jobs.lock().unwrap().clone()
    }
}

impl FirmwareFlasher for MockFlasher {
    fn flash(&self, job: &FlashJob) -> Result<()> {
        self.jobs.lock().unwrap().push(job.clone());
        Ok(())
    }

    fn monitor(&self, port: &str, _chip: Chip) -> Result<()> {
        self.monitored_ports.lock().unwrap().push(port.to_string());
        Ok(())
    }
}
