#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_lookup_application::ports::{DnsTransport, TransportSession};
use ferrous_lookup_domain::wire::{Header, NameDecoder, Question, HEADER_LEN};
use ferrous_lookup_domain::DomainError;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How the mock resolver treats a question name.
#[derive(Clone, Debug)]
pub enum Behavior {
    Answer(Ipv4Addr),
    AnswerName(String),
    /// Never sends a response datagram.
    Hang,
    /// Answers with a different transaction id.
    WrongId,
    /// Answers with bytes that are not a DNS message.
    Garbage,
    SendFails,
}

#[derive(Clone, Default)]
pub struct MockDnsTransport {
    behaviors: Arc<Mutex<HashMap<String, Behavior>>>,
    questions: Arc<Mutex<Vec<Question>>>,
    fail_open: Arc<AtomicBool>,
    hang_open: Arc<AtomicBool>,
    delay: Arc<Mutex<Duration>>,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl MockDnsTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_behavior(&self, name: &str, behavior: Behavior) {
        self.behaviors
            .lock()
            .unwrap()
            .insert(name.to_string(), behavior);
    }

    pub fn set_fail_open(&self, fail: bool) {
        self.fail_open.store(fail, Ordering::SeqCst);
    }

    /// Makes `open` never complete, as if socket setup stalled.
    pub fn set_hang_open(&self, hang: bool) {
        self.hang_open.store(hang, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn questions(&self) -> Vec<Question> {
        self.questions.lock().unwrap().clone()
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn behavior_for(&self, name: &str) -> Behavior {
        self.behaviors
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or(Behavior::Answer(Ipv4Addr::new(192, 0, 2, 1)))
    }
}

#[async_trait]
impl DnsTransport for MockDnsTransport {
    async fn open(&self) -> Result<Box<dyn TransportSession>, DomainError> {
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(DomainError::Transport {
                server: self.server(),
                reason: "mock refused to open".into(),
            });
        }

        if self.hang_open.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }

        self.opened.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        Ok(Box::new(MockSession {
            transport: self.clone(),
            pending: None,
        }))
    }

    fn server(&self) -> String {
        "mock:53".to_string()
    }
}

struct MockSession {
    transport: MockDnsTransport,
    pending: Option<(Behavior, Vec<u8>)>,
}

#[async_trait]
impl TransportSession for MockSession {
    async fn send(&mut self, message: &[u8]) -> Result<usize, DomainError> {
        let mut decoder = NameDecoder::new(message);
        let (question, _) = Question::decode(&mut decoder, HEADER_LEN)
            .expect("orchestrator sent an undecodable query");
        let behavior = self.transport.behavior_for(&question.name);
        self.transport.questions.lock().unwrap().push(question);

        if let Behavior::SendFails = behavior {
            return Err(DomainError::Transport {
                server: self.transport.server(),
                reason: "mock send failure".into(),
            });
        }

        self.pending = Some((behavior, message.to_vec()));
        Ok(message.len())
    }

    async fn recv(&mut self, buf: &mut [u8]) -> Result<usize, DomainError> {
        let delay = *self.transport.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let (behavior, query) = self.pending.take().expect("recv before send");
        let response = match behavior {
            Behavior::Hang => std::future::pending::<Vec<u8>>().await,
            Behavior::Garbage => vec![0xde, 0xad],
            Behavior::WrongId => {
                let mut response = answer(&query, 1, &[127, 0, 0, 2]);
                response[0] ^= 0xff;
                response
            }
            Behavior::Answer(ip) => answer(&query, 1, &ip.octets()),
            Behavior::AnswerName(name) => answer(&query, 12, &encode(&name)),
            Behavior::SendFails => unreachable!(),
        };

        buf[..response.len()].copy_from_slice(&response);
        Ok(response.len())
    }
}

impl Drop for MockSession {
    fn drop(&mut self) {
        self.transport.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.transport.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Echoes the query's id and question and appends one answer whose name
/// points back at the question.
fn answer(query: &[u8], rtype: u16, rdata: &[u8]) -> Vec<u8> {
    let header = Header::decode(query).expect("query header");

    let mut response = Vec::with_capacity(query.len() + 16 + rdata.len());
    response.extend_from_slice(&header.id.to_be_bytes());
    response.extend_from_slice(&[0x81, 0x80, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00]);
    response.extend_from_slice(&query[HEADER_LEN..]);
    response.extend_from_slice(&[0xc0, 0x0c]);
    response.extend_from_slice(&rtype.to_be_bytes());
    response.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x3c]);
    response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
    response.extend_from_slice(rdata);
    response
}

fn encode(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.split('.') {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}
