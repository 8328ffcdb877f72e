use qviz_core::*;

pub struct TestHarness {
    pub engine: Engine,
    pub animator: HeadlessAnimator,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            engine: Engine::default(),
            animator: HeadlessAnimator::new(),
        }
    }

    pub fn with_topology(topology: TopologyConfig) -> Self {
        Self::with_config(EngineConfig {
            topology,
            ..Default::default()
        })
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: Engine::new(config).unwrap(),
            animator: HeadlessAnimator::new(),
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.engine = self.engine.with_catalog(catalog);
        self
    }

    pub fn with_animator(mut self, animator: HeadlessAnimator) -> Self {
        self.animator = animator;
        self
    }

    pub fn inter(&self) -> u64 {
        self.engine.topology().latency(Region::A, Region::B)
    }

    pub fn intra(&self) -> u64 {
        self.engine.topology().latency(Region::A, Region::A)
    }

    pub fn run(&mut self, selection: &Selection) -> RunResult {
        self.engine
            .run_to_completion(selection, &mut self.animator)
            .unwrap()
    }

    pub fn latency(&mut self, selection: &Selection) -> u64 {
        let result = self.run(selection);
        assert!(result.is_completed(), "run failed: {:?}", result.outcome);
        result.client_latency_us
    }

    /// Steps until the client is acknowledged and returns the readout at
    /// that instant. The run may still have background work pending.
    pub fn run_until_response(&mut self, selection: &Selection) -> Readout {
        self.engine.start_run(selection).unwrap();
        while self.engine.readout().client_latency_us.is_none() {
            assert!(
                self.engine.step(&mut self.animator),
                "run ended before response"
            );
        }
        self.engine.readout()
    }

    pub fn finish(&mut self) -> RunResult {
        while self.engine.step(&mut self.animator) {}
        assert!(!self.engine.is_running());
        self.engine.last_result().cloned().unwrap()
    }
}

pub fn two_tier(operation: Operation) -> Selection {
    Selection::new(DatabaseFamily::TwoTier, operation)
}

pub fn single_tier(operation: Operation) -> Selection {
    Selection::new(DatabaseFamily::SingleTier, operation)
}
