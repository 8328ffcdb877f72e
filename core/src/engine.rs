//! Discrete-event run engine.
//!
//! A run is a set of tasks walking a scenario script. The foreground task is
//! the client's critical path; detached tails become background tasks. Every
//! suspension (pacing pause, marker flight) is an event on a virtual clock,
//! so concurrent hops overlap in time and a wavefront joins when its last
//! marker arrives.

use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::network::Topology;
use crate::placement::{RolePlacement, Selection};
use crate::scenarios::{Catalog, ScenarioKey};
use crate::script::{Hop, Projection, Step};
use crate::traits::{Animator, MarkerId};

pub type TaskId = usize;

const FOREGROUND: TaskId = 0;

#[derive(Debug, Clone)]
enum EventType {
    Resume,
    Arrival {
        hop: Hop,
        marker: MarkerId,
        record: usize,
    },
}

#[derive(Debug, Clone)]
struct Event {
    time: u64,
    sequence: u64,
    task: TaskId,
    event_type: EventType,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.sequence == other.sequence
    }
}
impl Eq for Event {}
impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then(self.sequence.cmp(&other.sequence))
    }
}

#[derive(Debug)]
struct Task {
    steps: VecDeque<Step>,
    in_flight: usize,
    background: bool,
    done: bool,
}

impl Task {
    fn new(steps: Vec<Step>, background: bool) -> Self {
        Self {
            steps: steps.into(),
            in_flight: 0,
            background,
            done: false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum HopOutcome {
    InFlight,
    Accumulated { total_us: u64 },
    Suppressed,
    Skipped,
    Aborted,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HopRecord {
    pub hop: Hop,
    pub started_us: u64,
    pub finished_us: Option<u64>,
    pub outcome: HopOutcome,
}

/// The live latency counter.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Readout {
    pub accumulated_us: u64,
    /// Frozen when the client is acknowledged.
    pub client_latency_us: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", tag = "status")]
pub enum RunOutcome {
    Completed,
    Failed { message: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RunResult {
    pub key: ScenarioKey,
    pub placement: RolePlacement,
    pub client_latency_us: u64,
    pub outcome: RunOutcome,
    pub started_us: u64,
    pub responded_us: Option<u64>,
    pub finished_us: u64,
    pub hops: Vec<HopRecord>,
}

impl RunResult {
    pub fn is_completed(&self) -> bool {
        self.outcome == RunOutcome::Completed
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::from)
    }
}

struct ActiveRun {
    key: ScenarioKey,
    placement: RolePlacement,
    speed: u8,
    started_us: u64,
    responded_us: Option<u64>,
}

pub struct Engine {
    pub time: u64,
    config: EngineConfig,
    topology: Topology,
    catalog: Catalog,
    events: BinaryHeap<Reverse<Event>>,
    sequence: u64,
    run: Option<ActiveRun>,
    tasks: Vec<Task>,
    readout: Readout,
    trace: Vec<HopRecord>,
    last_result: Option<RunResult>,
}

impl Default for Engine {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            time: 0,
            topology: Topology::new(config.topology),
            config,
            catalog: Catalog::default(),
            events: BinaryHeap::new(),
            sequence: 0,
            run: None,
            tasks: Vec::new(),
            readout: Readout::default(),
            trace: Vec::new(),
            last_result: None,
        }
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            topology: Topology::new(config.topology),
            config,
            ..Self::default()
        })
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn readout(&self) -> Readout {
        self.readout
    }

    pub fn trace(&self) -> &[HopRecord] {
        &self.trace
    }

    pub fn last_result(&self) -> Option<&RunResult> {
        self.last_result.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Controls that start a run or edit its inputs are usable only while
    /// no run is active.
    pub fn controls_enabled(&self) -> bool {
        !self.is_running()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn set_config(&mut self, config: EngineConfig) -> Result<()> {
        if self.is_running() {
            return Err(Error::RunInProgress);
        }
        config.validate()?;
        self.topology = Topology::new(config.topology);
        self.config = config;
        Ok(())
    }

    /// Clears the readout and trace of the previous run. Ignored while a run
    /// is active.
    pub fn on_selection_changed(&mut self, selection: &Selection) -> bool {
        if self.is_running() {
            return false;
        }
        log::debug!(
            "selection changed to {}/{}",
            selection.family,
            selection.operation
        );
        self.readout = Readout::default();
        self.trace.clear();
        true
    }

    /// Latency the selected scenario would accumulate if every node resolves.
    pub fn projected_latency_us(&self, selection: &Selection, projection: Projection) -> Result<u64> {
        let (_, script) = self.catalog.script_for(selection, &self.topology)?;
        Ok(script.projected_latency_us(&self.topology, projection))
    }

    /// Validates the selection, resets the readout and queues the first step.
    /// Nothing is touched when the scenario is unsupported.
    pub fn start_run(&mut self, selection: &Selection) -> Result<ScenarioKey> {
        if self.is_running() {
            return Err(Error::RunInProgress);
        }
        let (key, mut script) = self.catalog.script_for(selection, &self.topology)?;
        if self.config.animation.warmup_us > 0 {
            script.prepend(Step::Pause(self.config.animation.warmup_us));
        }
        let placement = RolePlacement::resolve(selection);
        log::info!(
            "starting {} with client in {}, control leader in {}, data leaders {:?}",
            key,
            placement.client,
            placement.control_leader,
            placement.data_leaders
        );

        self.events.clear();
        self.readout = Readout::default();
        self.trace.clear();
        self.tasks = vec![Task::new(script.into_steps(), false)];
        self.tasks[FOREGROUND].in_flight = 1;
        self.run = Some(ActiveRun {
            key,
            placement,
            speed: selection.clamped_speed(),
            started_us: self.time,
            responded_us: None,
        });
        self.schedule(self.time, FOREGROUND, EventType::Resume);
        Ok(key)
    }

    /// Processes the next event. Returns `false` when nothing is pending.
    pub fn step(&mut self, animator: &mut dyn Animator) -> bool {
        let Some(Reverse(event)) = self.events.pop() else {
            return false;
        };
        self.time = self.time.max(event.time);
        if let Err(err) = self.dispatch(event, animator) {
            self.abort_run(err, animator);
        }
        true
    }

    /// Processes every event due within `dt_us`, then moves the clock.
    pub fn advance(&mut self, dt_us: u64, animator: &mut dyn Animator) {
        let target = self.time.saturating_add(dt_us);
        while self
            .events
            .peek()
            .is_some_and(|Reverse(next)| next.time <= target)
        {
            self.step(animator);
        }
        self.time = target;
    }

    /// Starts a run and drives it until every task, background ones
    /// included, has finished.
    pub fn run_to_completion(&mut self, selection: &Selection, animator: &mut dyn Animator) -> Result<RunResult> {
        self.start_run(selection)?;
        while self.step(animator) {}
        if self.is_running() {
            self.abort_run(Error::Stalled, animator);
            return Err(Error::Stalled);
        }
        self.last_result.clone().ok_or(Error::Stalled)
    }

    fn schedule(&mut self, time: u64, task: TaskId, event_type: EventType) {
        self.sequence += 1;
        self.events.push(Reverse(Event {
            time,
            sequence: self.sequence,
            task,
            event_type,
        }));
    }

    fn dispatch(&mut self, event: Event, animator: &mut dyn Animator) -> Result<()> {
        if self.run.is_none() || event.task >= self.tasks.len() {
            return Ok(());
        }
        if let EventType::Arrival { hop, marker, record } = event.event_type {
            animator.marker_arrived(marker);
            self.settle(event.task, hop, record);
        }
        let task = &mut self.tasks[event.task];
        task.in_flight = task.in_flight.saturating_sub(1);
        if task.in_flight == 0 {
            self.drive(event.task, animator)?;
        }
        Ok(())
    }

    fn settle(&mut self, task: TaskId, hop: Hop, record: usize) {
        let background = hop.background || self.tasks[task].background;
        let outcome = if hop.counted && !background && self.topology.is_network_significant(hop.latency_us) {
            self.readout.accumulated_us = self.readout.accumulated_us.saturating_add(hop.latency_us);
            HopOutcome::Accumulated {
                total_us: self.readout.accumulated_us,
            }
        } else {
            HopOutcome::Suppressed
        };
        log::debug!(
            "{} -> {} arrived ({}us, {:?})",
            hop.from,
            hop.to,
            hop.latency_us,
            outcome
        );
        if let Some(rec) = self.trace.get_mut(record) {
            rec.finished_us = Some(self.time);
            rec.outcome = outcome;
        }
    }

    fn drive(&mut self, id: TaskId, animator: &mut dyn Animator) -> Result<()> {
        loop {
            let Some(step) = self.tasks[id].steps.pop_front() else {
                self.complete_task(id);
                return Ok(());
            };
            match step {
                Step::Pause(delay_us) => {
                    self.tasks[id].in_flight = 1;
                    self.schedule(self.time.saturating_add(delay_us), id, EventType::Resume);
                    return Ok(());
                }
                Step::Hops(hops) => {
                    let launched = self.launch(id, &hops, animator)?;
                    if launched > 0 {
                        self.tasks[id].in_flight = launched;
                        return Ok(());
                    }
                }
                Step::Detach(script) => {
                    let child = self.tasks.len();
                    self.tasks.push(Task::new(script.into_steps(), true));
                    log::debug!("task {} detached background task {}", id, child);
                    self.drive(child, animator)?;
                }
            }
        }
    }

    /// Starts every hop of a wavefront whose endpoints resolve and returns
    /// how many are in flight. When the counted hop cannot be shown, the
    /// first resolvable sibling carries the wavefront's cost instead.
    fn launch(&mut self, id: TaskId, hops: &[Hop], animator: &mut dyn Animator) -> Result<usize> {
        let speed = self.run.as_ref().map_or(1, |run| run.speed);
        let background = self.tasks[id].background;
        let resolved: Vec<_> = hops
            .iter()
            .map(|hop| {
                animator
                    .resolve_position(hop.from)
                    .zip(animator.resolve_position(hop.to))
            })
            .collect();
        let orphaned_cost = hops
            .iter()
            .zip(&resolved)
            .find(|(hop, endpoints)| hop.counted && endpoints.is_none())
            .map(|(hop, _)| hop.latency_us);
        let heir = orphaned_cost.and_then(|_| resolved.iter().position(Option::is_some));

        let mut launched = 0;
        for (i, (hop, endpoints)) in hops.iter().zip(resolved).enumerate() {
            let mut hop = Hop {
                background: hop.background || background,
                ..*hop
            };
            let Some((from, to)) = endpoints else {
                log::debug!("skipping {} -> {}: endpoint not shown", hop.from, hop.to);
                self.trace.push(HopRecord {
                    hop,
                    started_us: self.time,
                    finished_us: Some(self.time),
                    outcome: HopOutcome::Skipped,
                });
                continue;
            };
            if heir == Some(i) {
                if let Some(cost) = orphaned_cost {
                    hop.counted = true;
                    hop.latency_us = hop.latency_us.max(cost);
                }
            }
            let duration_us = self.config.animation.duration_us(hop.latency_us, speed);
            let marker = animator.move_marker(from, to, self.time, duration_us)?;
            let record = self.trace.len();
            self.trace.push(HopRecord {
                hop,
                started_us: self.time,
                finished_us: None,
                outcome: HopOutcome::InFlight,
            });
            self.schedule(
                self.time.saturating_add(duration_us),
                id,
                EventType::Arrival { hop, marker, record },
            );
            launched += 1;
        }
        Ok(launched)
    }

    fn complete_task(&mut self, id: TaskId) {
        self.tasks[id].done = true;
        if id == FOREGROUND {
            self.readout.client_latency_us = Some(self.readout.accumulated_us);
            if let Some(run) = self.run.as_mut() {
                run.responded_us = Some(self.time);
                log::info!(
                    "{} acknowledged the client after {}us",
                    run.key,
                    self.readout.accumulated_us
                );
            }
        }
        if self.tasks.iter().all(|t| t.done) {
            self.finish_run(RunOutcome::Completed);
        }
    }

    fn abort_run(&mut self, err: Error, animator: &mut dyn Animator) {
        log::error!("run aborted: {}", err);
        animator.clear_markers();
        for rec in self.trace.iter_mut() {
            if rec.outcome == HopOutcome::InFlight {
                rec.outcome = HopOutcome::Aborted;
            }
        }
        self.finish_run(RunOutcome::Failed {
            message: err.to_string(),
        });
    }

    fn finish_run(&mut self, outcome: RunOutcome) {
        let Some(run) = self.run.take() else {
            return;
        };
        self.tasks.clear();
        self.events.clear();
        let client_latency_us = *self
            .readout
            .client_latency_us
            .get_or_insert(self.readout.accumulated_us);
        log::info!(
            "{} finished after {}us of animation: {:?}",
            run.key,
            self.time.saturating_sub(run.started_us),
            outcome
        );
        self.last_result = Some(RunResult {
            key: run.key,
            placement: run.placement,
            client_latency_us,
            outcome,
            started_us: run.started_us,
            responded_us: run.responded_us,
            finished_us: self.time,
            hops: self.trace.clone(),
        });
    }
}
