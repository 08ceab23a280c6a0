//! REST backend over `ureq`.

use super::{CosmeticsSource, EquippedAssets, RewardBackend};
use crate::error::BackendError;
use crate::reward::{RewardRecord, TaskCompletion};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const USER_AGENT: &str = "lane-runner";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const EQUIPPED_ASSETS_PATH: &str = "/equipped_assets/";
const TASK_COMPLETION_PATH: &str = "/task-completion";
const CLAIM_REWARDS_PATH: &str = "/health_quiz/claim_rewards";
const USER_PATH: &str = "/user";

#[derive(Serialize)]
struct ClaimRewardsBody {
    coins: u32,
    xp: u32,
}

#[derive(Deserialize)]
struct UserSnapshot {
    #[serde(default)]
    battery: u32,
}

#[derive(Serialize)]
struct BatteryUpdate {
    battery: u32,
}

pub struct HttpBackend {
    base_url: String,
    user_id: Option<String>,
    token: Option<String>,
    agent: ureq::Agent,
}

impl HttpBackend {
    pub fn new(base_url: &str, user_id: Option<String>, token: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id,
            token,
            agent,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> Result<String, BackendError> {
        self.token
            .as_deref()
            .map(|t| format!("Bearer {}", t))
            .ok_or(BackendError::MissingCredentials)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let response = self
            .agent
            .get(&self.url(path))
            .set("Authorization", &self.bearer()?)
            .call()
            .map_err(|e| request_error(path, e))?;
        response.into_json().map_err(|source| BackendError::Decode {
            endpoint: path.to_string(),
            source,
        })
    }

    fn send_json<B: Serialize>(&self, method: &str, path: &str, body: &B) -> Result<(), BackendError> {
        self.agent
            .request(method, &self.url(path))
            .set("Authorization", &self.bearer()?)
            .send_json(body)
            .map_err(|e| request_error(path, e))?;
        Ok(())
    }
}

fn request_error(endpoint: &str, err: ureq::Error) -> BackendError {
    match err {
        ureq::Error::Status(status, _) => BackendError::Status {
            endpoint: endpoint.to_string(),
            status,
        },
        ureq::Error::Transport(transport) => BackendError::Transport {
            endpoint: endpoint.to_string(),
            message: transport.to_string(),
        },
    }
}

impl CosmeticsSource for HttpBackend {
    fn fetch_equipped(&self) -> Result<EquippedAssets, BackendError> {
        self.get_json(EQUIPPED_ASSETS_PATH)
    }
}

impl RewardBackend for HttpBackend {
    fn submit_task_completion(&self, record: &RewardRecord) -> Result<(), BackendError> {
        let user_id = self
            .user_id
            .as_deref()
            .ok_or(BackendError::MissingCredentials)?;
        let body = TaskCompletion::from_record(user_id, record);
        self.send_json("POST", TASK_COMPLETION_PATH, &body)
    }

    fn add_progress(&self, coins: u32, xp: u32) -> Result<(), BackendError> {
        self.send_json("POST", CLAIM_REWARDS_PATH, &ClaimRewardsBody { coins, xp })
    }

    fn raise_battery(&self, increment: u32, cap: u32) -> Result<u32, BackendError> {
        let user: UserSnapshot = self.get_json(USER_PATH)?;
        let battery = user.battery.saturating_add(increment).min(cap);
        self.send_json("PUT", USER_PATH, &BatteryUpdate { battery })?;
        Ok(battery)
    }
}
