use crate::ports::{DnsTransport, LookupSink};
use ferrous_lookup_domain::config::QueryConfig;
use ferrous_lookup_domain::{
    DomainError, LookupReport, LookupTarget, Query, RecordType, Response,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Largest datagram accepted from the resolver.
const MAX_RESPONSE_SIZE: usize = 4096;

#[derive(Debug, Clone)]
pub struct LookupOptions {
    pub forward_type: RecordType,
    pub timeout: Duration,
    pub max_in_flight: usize,
}

impl LookupOptions {
    pub fn from_config(config: &QueryConfig) -> Self {
        Self {
            forward_type: config.forward_type().unwrap_or(RecordType::A),
            timeout: config.timeout(),
            max_in_flight: config.max_in_flight.max(1),
        }
    }
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self::from_config(&QueryConfig::default())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupSummary {
    pub dispatched: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Targets excluded before dispatch (reserved literals, invalid names).
    pub rejected: usize,
}

impl LookupSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0 && self.rejected == 0
    }
}

type TaskResult = Result<(), (String, DomainError)>;

/// Looks up every target concurrently and funnels the reports to one sink.
pub struct LookupTargetsUseCase {
    transport: Arc<dyn DnsTransport>,
    options: LookupOptions,
}

impl LookupTargetsUseCase {
    pub fn new(transport: Arc<dyn DnsTransport>, options: LookupOptions) -> Self {
        Self { transport, options }
    }

    /// Runs one lookup per target and waits for all of them.
    ///
    /// A failing target is logged and counted without affecting the others.
    /// Only a fatal error (no entropy for query ids) aborts the run.
    /// A report the sink fails to write counts as failed; a failed final
    /// flush is returned as `OutputError`.
    pub async fn execute(
        &self,
        targets: &[String],
        sink: Box<dyn LookupSink>,
    ) -> Result<LookupSummary, DomainError> {
        let start = Instant::now();
        let mut summary = LookupSummary::default();

        let mut dispatchable = Vec::with_capacity(targets.len());
        for input in targets {
            match LookupTarget::classify(input, self.options.forward_type) {
                Ok(target) => dispatchable.push(target),
                Err(e) => {
                    warn!(target = %input, error = %e, "Target rejected");
                    summary.rejected += 1;
                }
            }
        }

        let limit = self.options.max_in_flight.max(1);
        let (report_tx, report_rx) = mpsc::channel(limit);
        let writer = tokio::spawn(write_reports(report_rx, sink));

        let permits = Arc::new(Semaphore::new(limit));
        let mut tasks: JoinSet<TaskResult> = JoinSet::new();

        for target in dispatchable {
            let transport = Arc::clone(&self.transport);
            let permits = Arc::clone(&permits);
            let report_tx = report_tx.clone();
            let timeout = self.options.timeout;

            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await.map_err(|_| {
                    (
                        target.input.clone(),
                        DomainError::Transport {
                            server: transport.server(),
                            reason: "lookup pool closed".into(),
                        },
                    )
                })?;

                let report = lookup(transport.as_ref(), &target, timeout)
                    .await
                    .map_err(|e| (target.input.clone(), e))?;

                report_tx.send(report).await.map_err(|_| {
                    (
                        target.input.clone(),
                        DomainError::OutputError("report writer stopped".into()),
                    )
                })
            });
            summary.dispatched += 1;
        }
        drop(report_tx);

        debug!(
            dispatched = summary.dispatched,
            max_in_flight = limit,
            "Lookups dispatched"
        );

        let mut fatal: Option<DomainError> = None;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => summary.succeeded += 1,
                Ok(Err((input, e))) if e.is_fatal() => {
                    error!(target = %input, error = %e, "Fatal lookup error, aborting");
                    summary.failed += 1;
                    tasks.abort_all();
                    fatal.get_or_insert(e);
                }
                Ok(Err((input, e))) => {
                    warn!(target = %input, error = %e, "Lookup failed");
                    summary.failed += 1;
                }
                Err(e) if e.is_cancelled() => summary.failed += 1,
                Err(e) => {
                    warn!(error = %e, "Lookup task panicked");
                    summary.failed += 1;
                }
            }
        }

        let outcome = match writer.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Report writer panicked");
                WriteOutcome::default()
            }
        };
        debug!(written = outcome.written, "Report writer finished");

        // A lookup only succeeds once its report reached the sink
        let unwritten = summary.succeeded.saturating_sub(outcome.written);
        summary.succeeded -= unwritten;
        summary.failed += unwritten;

        if let Some(e) = fatal {
            return Err(e);
        }
        if let Some(e) = outcome.flush_error {
            return Err(e);
        }

        info!(
            dispatched = summary.dispatched,
            succeeded = summary.succeeded,
            failed = summary.failed,
            rejected = summary.rejected,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Lookups complete"
        );

        Ok(summary)
    }
}

/// One exchange: build, send, await a single datagram, decode, validate.
///
/// The session is dropped on every exit path.
async fn lookup(
    transport: &dyn DnsTransport,
    target: &LookupTarget,
    timeout: Duration,
) -> Result<LookupReport, DomainError> {
    let query = Query::new(&target.domain, target.record_type)?;
    let message = query.to_bytes();

    let mut buf = vec![0u8; MAX_RESPONSE_SIZE];

    // The session lives only inside the deadline
    let len = tokio::time::timeout(timeout, async {
        let mut session = transport.open().await?;
        session.send(&message).await?;
        session.recv(&mut buf).await
    })
    .await
    .map_err(|_| DomainError::TransportTimeout {
        server: transport.server(),
    })??;

    debug!(
        target = %target.input,
        id = %format_args!("0x{:04x}", query.id()),
        qtype = %target.record_type,
        bytes = len,
        "Response received"
    );

    let response = Response::decode(&buf[..len])?;
    response.ensure_answers(&query)?;

    Ok(LookupReport::from_response(target.input.as_str(), &response))
}

#[derive(Debug, Default)]
struct WriteOutcome {
    written: usize,
    flush_error: Option<DomainError>,
}

/// Sole writer of the sink; reports are written in arrival order.
async fn write_reports(
    mut reports: mpsc::Receiver<LookupReport>,
    mut sink: Box<dyn LookupSink>,
) -> WriteOutcome {
    let mut outcome = WriteOutcome::default();

    while let Some(report) = reports.recv().await {
        match sink.emit(&report) {
            Ok(()) => outcome.written += 1,
            Err(e) => error!(target = %report.target, error = %e, "Failed to write report"),
        }
    }

    if let Err(e) = sink.flush() {
        error!(error = %e, "Failed to flush reports");
        outcome.flush_error = Some(e);
    }

    outcome
}
