//! Simulation orchestrator
//!
//! A single actor task owns every piece of mutable state: the debounce
//! timer, the in-flight request and the request sequence number. Callers
//! talk to it through a [`SimulationHandle`] and observe a
//! [`SimulationView`] published on a watch channel.
//!
//! Input changes are debounced; once the trailing change fires, the previous
//! request is aborted and exactly one market-data request is issued for the
//! operating mode of the inputs. A completion is applied only when it belongs
//! to the latest request, so a slow earlier response can never overwrite a
//! newer one.

use std::sync::Arc;
use std::time::Duration;

use rentsim_core::evaluate_inputs;
use rentsim_core::model::{
    AirbnbData, DataSource, Freshness, OperatingMode, RentData, SimulationInputs,
    SimulationResult,
};
use tokio::sync::{mpsc, watch};

use crate::abort::AbortSignal;
use crate::debounce::Debouncer;
use crate::source::{FetchError, MarketDataSource};

/// Advisory shown when the result had to be computed without market data
pub const FALLBACK_NOTICE: &str = "Live market data unavailable, local estimate used.";

// ============================================================================
// View
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationPhase {
    /// No city entered; nothing to show
    #[default]
    Idle,
    /// A market-data request is in flight
    Pending,
    /// Result computed from market data
    Settled,
    /// Market data failed; result computed from the local fallback
    Error,
}

impl SimulationPhase {
    /// Whether the latest inputs have been fully handled
    pub fn is_resolved(self) -> bool {
        !matches!(self, SimulationPhase::Pending)
    }
}

/// Snapshot of the simulation state published to observers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationView {
    pub phase: SimulationPhase,
    /// Inputs the view was computed for (clamped)
    pub inputs: Option<SimulationInputs>,
    pub result: Option<SimulationResult>,
    /// Advisory message, set in the `Error` phase
    pub error: Option<String>,
    /// Sequence number of the request behind this view; 0 before the first one
    pub request_id: u64,
}

// ============================================================================
// Handle
// ============================================================================

#[derive(Debug)]
enum Command {
    Update(SimulationInputs),
    Dispose,
}

/// Cloneable handle on a running orchestrator
///
/// The actor stops on [`SimulationHandle::dispose`] or once every handle has
/// been dropped.
#[derive(Debug, Clone)]
pub struct SimulationHandle {
    commands: mpsc::UnboundedSender<Command>,
    view: watch::Receiver<SimulationView>,
}

impl SimulationHandle {
    /// Spawn the orchestrator on the current tokio runtime.
    pub fn spawn(source: Arc<dyn MarketDataSource>, debounce: Duration) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(SimulationView::default());

        let orchestrator = Orchestrator::new(source, debounce, command_rx, view_tx);
        tokio::spawn(orchestrator.run());

        Self {
            commands: command_tx,
            view: view_rx,
        }
    }

    /// Submit new inputs. Returns `false` if the orchestrator has stopped.
    pub fn update(&self, inputs: SimulationInputs) -> bool {
        self.commands.send(Command::Update(inputs)).is_ok()
    }

    /// Cancel any pending work and stop the orchestrator.
    pub fn dispose(&self) {
        let _ = self.commands.send(Command::Dispose);
    }

    /// Latest published view
    pub fn current(&self) -> SimulationView {
        self.view.borrow().clone()
    }

    /// A fresh receiver of view updates
    pub fn subscribe(&self) -> watch::Receiver<SimulationView> {
        self.view.clone()
    }

    /// Wait for the next published view. `None` once the orchestrator has stopped.
    pub async fn changed(&mut self) -> Option<SimulationView> {
        self.view.changed().await.ok()?;
        Some(self.view.borrow_and_update().clone())
    }

    /// Wait until `inputs` have been fully handled and return the resulting view.
    pub async fn resolved(&self, inputs: &SimulationInputs) -> Option<SimulationView> {
        let expected = inputs.clamped();
        let mut view = self.view.clone();
        let resolved = view
            .wait_for(|v| v.phase.is_resolved() && v.inputs.as_ref() == Some(&expected))
            .await
            .ok()?;
        Some(resolved.clone())
    }
}

// ============================================================================
// Actor
// ============================================================================

#[derive(Debug)]
enum MarketFetch {
    LongTerm(RentData),
    ShortTerm(AirbnbData),
}

#[derive(Debug)]
struct Completion {
    seq: u64,
    outcome: Result<MarketFetch, FetchError>,
}

struct InFlight {
    seq: u64,
    inputs: SimulationInputs,
    signal: AbortSignal,
}

struct Orchestrator {
    source: Arc<dyn MarketDataSource>,
    commands: mpsc::UnboundedReceiver<Command>,
    debouncer: Debouncer<SimulationInputs>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: Option<InFlight>,
    seq: u64,
    view: watch::Sender<SimulationView>,
}

impl Orchestrator {
    fn new(
        source: Arc<dyn MarketDataSource>,
        debounce: Duration,
        commands: mpsc::UnboundedReceiver<Command>,
        view: watch::Sender<SimulationView>,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            source,
            commands,
            debouncer: Debouncer::new(debounce),
            completions_tx,
            completions_rx,
            in_flight: None,
            seq: 0,
            view,
        }
    }

    async fn run(mut self) {
        tracing::debug!(
            source = self.source.name(),
            debounce_ms = self.debouncer.delay().as_millis() as u64,
            "Simulation orchestrator started"
        );

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Update(inputs)) => self.debouncer.schedule(inputs.clamped()),
                    Some(Command::Dispose) | None => break,
                },
                inputs = self.debouncer.fired() => self.start(inputs),
                Some(completion) = self.completions_rx.recv() => self.complete(completion),
            }
        }

        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.debouncer.cancel();
        self.abort_in_flight();
        tracing::debug!("Simulation orchestrator stopped");
    }

    fn abort_in_flight(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            tracing::trace!(seq = previous.seq, "Aborting market data request");
            previous.signal.abort();
        }
    }

    /// Handle inputs whose debounce window has elapsed.
    fn start(&mut self, inputs: SimulationInputs) {
        self.abort_in_flight();

        let Some(city) = inputs.trimmed_city().map(str::to_string) else {
            self.view.send_modify(|view| {
                view.phase = SimulationPhase::Idle;
                view.inputs = Some(inputs);
                view.result = None;
                view.error = None;
            });
            return;
        };

        self.seq += 1;
        let seq = self.seq;
        let signal = AbortSignal::new();
        tracing::debug!(
            seq,
            %city,
            mode = %inputs.operating_mode,
            room_type = %inputs.room_type,
            "Requesting market data"
        );

        tokio::spawn(fetch(
            Arc::clone(&self.source),
            seq,
            city,
            inputs.clone(),
            signal.clone(),
            self.completions_tx.clone(),
        ));

        self.in_flight = Some(InFlight {
            seq,
            inputs: inputs.clone(),
            signal,
        });
        self.view.send_replace(SimulationView {
            phase: SimulationPhase::Pending,
            inputs: Some(inputs),
            result: None,
            error: None,
            request_id: seq,
        });
    }

    /// Apply a finished request if it is still the latest one.
    fn complete(&mut self, completion: Completion) {
        if matches!(completion.outcome, Err(FetchError::Aborted)) {
            tracing::trace!(seq = completion.seq, "Market data request aborted");
            return;
        }

        let current = self.in_flight.as_ref().map(|f| f.seq);
        if current != Some(completion.seq) {
            tracing::trace!(
                seq = completion.seq,
                current = ?current,
                "Ignoring stale market data response"
            );
            return;
        }
        let Some(InFlight { seq, inputs, .. }) = self.in_flight.take() else {
            return;
        };

        let view = match completion.outcome {
            Ok(fetched) => {
                let result = evaluate_fetched(&inputs, fetched);
                tracing::debug!(seq, source = %result.data_source, "Simulation settled");
                SimulationView {
                    phase: SimulationPhase::Settled,
                    inputs: Some(inputs),
                    result: Some(result),
                    error: None,
                    request_id: seq,
                }
            }
            Err(e) => {
                tracing::warn!(seq, "Market data unavailable, using local estimate: {e}");
                SimulationView {
                    phase: SimulationPhase::Error,
                    result: Some(evaluate_inputs(&inputs, None, DataSource::Local)),
                    inputs: Some(inputs),
                    error: Some(FALLBACK_NOTICE.to_string()),
                    request_id: seq,
                }
            }
        };
        self.view.send_replace(view);
    }
}

async fn fetch(
    source: Arc<dyn MarketDataSource>,
    seq: u64,
    city: String,
    inputs: SimulationInputs,
    signal: AbortSignal,
    completions: mpsc::UnboundedSender<Completion>,
) {
    let request = async {
        match inputs.operating_mode {
            OperatingMode::LongTerm => source
                .rent_data(&city, inputs.room_type, &signal)
                .await
                .map(MarketFetch::LongTerm),
            OperatingMode::ShortTerm => source
                .airbnb_data(&city, &signal)
                .await
                .map(MarketFetch::ShortTerm),
        }
    };

    let outcome = tokio::select! {
        biased;
        _ = signal.aborted() => Err(FetchError::Aborted),
        outcome = request => outcome,
    };

    // The orchestrator may already be gone
    let _ = completions.send(Completion { seq, outcome });
}

/// Evaluate `inputs` with the revenue supplied by a market-data response.
fn evaluate_fetched(inputs: &SimulationInputs, fetched: MarketFetch) -> SimulationResult {
    let (supplied, source) = match fetched {
        MarketFetch::LongTerm(rent) => (
            rent.rent_per_sqm * inputs.surface,
            DataSource::LongTerm(Freshness::from_reported(rent.source.as_deref())),
        ),
        MarketFetch::ShortTerm(airbnb) => (
            airbnb.monthly_revenue_estimate,
            DataSource::ShortTerm(Freshness::from_reported(airbnb.source.as_deref())),
        ),
    };
    evaluate_inputs(inputs, Some(supplied), source)
}
