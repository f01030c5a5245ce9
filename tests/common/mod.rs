#![allow(dead_code)]

use voltronic_p18::voltronic::{Reply, Transport};

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::time::Duration;

pub fn common_setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Transport that answers from a script and remembers what was sent.
#[derive(Default)]
pub struct MockTransport {
    pub replies: VecDeque<voltronic_p18::error::Result<Reply>>,
    pub sent: Vec<String>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, reply: Reply) -> Self {
        self.replies.push_back(Ok(reply));
        self
    }

    pub fn fail(mut self, error: voltronic_p18::Error) -> Self {
        self.replies.push_back(Err(error));
        self
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&mut self, command: &[u8], timeout: Duration) -> voltronic_p18::error::Result<Reply> {
        self.sent.push(String::from_utf8_lossy(command).into_owned());
        self.replies
            .pop_front()
            .unwrap_or(Err(voltronic_p18::Error::Timeout(timeout)))
    }
}

pub struct Factory;

impl Factory {
    /// A query response frame as the link hands it over: CRC and `\r` stripped.
    pub fn query_reply(payload: &str) -> Reply {
        let frame = format!("^D{:03}{}", payload.len() + 3, payload);
        let received = frame.len() + 3;
        Reply {
            data: Bytes::from(frame),
            received,
        }
    }

    pub fn ack(success: bool) -> Reply {
        let frame = if success { "^1" } else { "^0" };
        Reply {
            data: Bytes::from_static(frame.as_bytes()),
            received: frame.len() + 3,
        }
    }

    pub fn raw_reply(text: &'static str) -> Reply {
        Reply {
            data: Bytes::from_static(text.as_bytes()),
            received: text.len() + 3,
        }
    }

    pub fn general_status_payload() -> &'static str {
        "2356,499,2301,500,0483,0468,010,545,000,000,000,008,090,035,040,000,0000,0000,0000,0000,1,2,0,1,0,1,0,0"
    }

    pub fn rated_information_payload() -> &'static str {
        "2300,217,2300,500,217,5000,5000,480,460,520,440,560,540,2,10,060,1,1,0,0,0,1,0,0,1"
    }
}
