//! The classification workflow state machine.
//!
//! ## Flow
//!
//! ```text
//!  Idle ──select──▶ ImageSelected ──classify──▶ Classifying(stage 0..n)
//!    ▲                 ▲    │                        │
//!    │                 │    └───clear───▶ Idle       ├── reply ──▶ Succeeded
//!    │                 └───── service error ─────────┤
//!    └──────────────── transport error ──────────────┘
//! ```
//!
//! One workflow drives one image at a time. The staged delays are purely
//! presentational; the remote call is issued only after the last stage
//! completes, so service latency and cosmetic delay never blur together.
//!
//! Every suspension point re-checks the selection epoch before writing
//! state: a `clear()` or a new selection while a classification is in
//! flight supersedes the attempt, which then abandons without writing
//! state or showing a notice.

use crate::intake::{
    payload_from_drop, payload_from_file, DropOutcome, DroppedItem, FileSource, ImagePayload,
    InputToken, IntakeError,
};
use crate::interpreter::{Interpretation, ResponseInterpreter};
use crate::notify::{Notice, NotificationSink};
use crate::remote::{RemoteClassifier, TransportError};
use crate::stage::{default_stages, Stage};
use crate::verdict::Verdict;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// The single coherent state of the workflow.
///
/// Every non-idle variant carries the selected image, so combinations
/// like "classifying with no image" or "result without an image" cannot
/// be expressed at all.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    /// Nothing is selected.
    Idle,
    /// An image is selected and ready to classify.
    ImageSelected {
        /// The selected image.
        image: ImagePayload,
    },
    /// A classification is in flight; `stage` indexes the visible phase.
    Classifying {
        /// The image being classified.
        image: ImagePayload,
        /// Index of the currently visible stage.
        stage: usize,
    },
    /// A classification completed; the image stays selected.
    Succeeded {
        /// The classified image.
        image: ImagePayload,
        /// The structured verdict.
        verdict: Verdict,
    },
}

impl WorkflowState {
    /// Returns the selected image, if any.
    pub fn image(&self) -> Option<&ImagePayload> {
        match self {
            WorkflowState::Idle => None,
            WorkflowState::ImageSelected { image }
            | WorkflowState::Classifying { image, .. }
            | WorkflowState::Succeeded { image, .. } => Some(image),
        }
    }

    /// Returns the completed verdict, if any.
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            WorkflowState::Succeeded { verdict, .. } => Some(verdict),
            _ => None,
        }
    }

    /// Returns true while a classification is in flight.
    pub fn is_classifying(&self) -> bool {
        matches!(self, WorkflowState::Classifying { .. })
    }

    /// Returns a short name for the state, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::ImageSelected { .. } => "image_selected",
            WorkflowState::Classifying { .. } => "classifying",
            WorkflowState::Succeeded { .. } => "succeeded",
        }
    }
}

/// Outcome of a [`Workflow::classify`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyOutcome {
    /// The reply parsed into a verdict; the workflow is now succeeded.
    Classified(Verdict),
    /// The service reported a failure; the image stays selected.
    ServiceRejected,
    /// The call failed at the transport level; the workflow reset fully.
    TransportFailed,
    /// No image is selected; nothing happened.
    NoImage,
    /// A classification is already in flight; nothing happened.
    Busy,
    /// The selection changed while this call was in flight; no state was
    /// written and no notice was shown.
    Superseded,
}

/// Configuration for a [`Workflow`].
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// The fixed progress sequence walked before the remote call.
    pub stages: Vec<Stage>,
    /// Deadline for the remote call. An elapsed deadline takes the
    /// transport-error path.
    pub remote_timeout: Duration,
    /// Auto-dismiss interval for service-reported error notices.
    pub service_error_auto_close: Duration,
    /// Auto-dismiss interval for transport error notices.
    pub transport_error_auto_close: Duration,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            stages: default_stages(),
            remote_timeout: Duration::from_secs(30),
            service_error_auto_close: Duration::from_millis(3000),
            transport_error_auto_close: Duration::from_millis(2000),
        }
    }
}

/// Callback invoked after every committed state change.
pub type OnStateChange = Arc<dyn Fn(&WorkflowState) + Send + Sync>;

struct WorkflowData {
    state: WorkflowState,
    drag_over: bool,
    input_token: InputToken,
    /// Bumped by clear, new selections, and transport resets. In-flight
    /// classifications compare against it before every state write.
    epoch: u64,
}

/// Drives image selection and classification, one image at a time.
pub struct Workflow {
    data: Arc<RwLock<WorkflowData>>,
    remote: Arc<dyn RemoteClassifier>,
    sink: Option<Arc<dyn NotificationSink>>,
    interpreter: ResponseInterpreter,
    config: WorkflowConfig,
    on_state_change: Option<OnStateChange>,
}

impl std::fmt::Debug for Workflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workflow")
            .field("state", &self.data.read().state.name())
            .field("config", &self.config)
            .field("has_sink", &self.sink.is_some())
            .field("has_on_state_change", &self.on_state_change.is_some())
            .finish()
    }
}

impl Workflow {
    /// Creates a workflow backed by the given remote classifier.
    pub fn new(remote: Arc<dyn RemoteClassifier>) -> Self {
        Self::with_config(remote, WorkflowConfig::default())
    }

    /// Creates a workflow with explicit configuration.
    pub fn with_config(remote: Arc<dyn RemoteClassifier>, config: WorkflowConfig) -> Self {
        Self {
            data: Arc::new(RwLock::new(WorkflowData {
                state: WorkflowState::Idle,
                drag_over: false,
                input_token: InputToken::initial(),
                epoch: 0,
            })),
            remote,
            sink: None,
            interpreter: ResponseInterpreter::new(),
            config,
            on_state_change: None,
        }
    }

    /// Attaches a notification sink for error notices.
    pub fn with_notifications(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Attaches a callback fired after every committed state change.
    pub fn with_on_state_change(mut self, callback: OnStateChange) -> Self {
        self.on_state_change = Some(callback);
        self
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> WorkflowState {
        self.data.read().state.clone()
    }

    /// Returns the current file-input identity token.
    pub fn input_token(&self) -> InputToken {
        self.data.read().input_token
    }

    /// Returns true while a drag hovers over the drop target.
    pub fn is_drag_over(&self) -> bool {
        self.data.read().drag_over
    }

    /// Returns the workflow configuration.
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Selects an image from a file-picker handle.
    ///
    /// Declines when no usable file was offered; nothing changes and no
    /// notice is shown. Selecting supersedes any classification still in
    /// flight.
    pub fn select_file(&self, source: Option<FileSource>) -> Result<(), IntakeError> {
        let payload = payload_from_file(source)?;
        self.install_image(payload);
        Ok(())
    }

    /// Offers a dropped item.
    ///
    /// Only items whose declared media type is an image type are
    /// accepted; anything else is ignored without a notice. The
    /// drag-over flag resets either way.
    pub fn select_drop(&self, item: DroppedItem) -> DropOutcome {
        if !item.is_image() {
            tracing::debug!(media_type = %item.media_type, "ignoring non-image drop");
            self.data.write().drag_over = false;
            return DropOutcome::Ignored;
        }
        self.install_image(payload_from_drop(item));
        DropOutcome::Accepted
    }

    /// Cosmetic signal: a drag entered the drop target.
    pub fn drag_over(&self) {
        self.data.write().drag_over = true;
    }

    /// Cosmetic signal: the drag left the drop target.
    pub fn drag_leave(&self) {
        self.data.write().drag_over = false;
    }

    /// Clears the selection and any result, returning to idle.
    ///
    /// Regenerates the file-input identity token so the same file can be
    /// picked again, and supersedes any classification still in flight.
    pub fn clear(&self) {
        let mut data = self.data.write();
        data.epoch = data.epoch.wrapping_add(1);
        data.drag_over = false;
        data.input_token = data.input_token.next();
        data.state = WorkflowState::Idle;
        drop(data);

        tracing::debug!("selection cleared");
        self.emit(&WorkflowState::Idle);
    }

    /// Runs one classification attempt for the selected image.
    ///
    /// Walks the configured stages in order, holding each visible for
    /// its duration, then calls the remote classifier and interprets the
    /// reply. At most one attempt runs per workflow; a second trigger
    /// while one is in flight returns [`ClassifyOutcome::Busy`]. If the
    /// selection changes while this call is suspended, the attempt
    /// abandons silently with [`ClassifyOutcome::Superseded`].
    pub async fn classify(&self) -> ClassifyOutcome {
        let (image, epoch) = {
            let mut data = self.data.write();
            match &data.state {
                WorkflowState::Idle => return ClassifyOutcome::NoImage,
                WorkflowState::Classifying { .. } => {
                    tracing::debug!("classification already in flight");
                    return ClassifyOutcome::Busy;
                }
                WorkflowState::ImageSelected { image }
                | WorkflowState::Succeeded { image, .. } => {
                    let image = image.clone();
                    data.state = WorkflowState::Classifying {
                        image: image.clone(),
                        stage: 0,
                    };
                    (image, data.epoch)
                }
            }
        };
        self.emit(&WorkflowState::Classifying {
            image: image.clone(),
            stage: 0,
        });
        tracing::debug!(stages = self.config.stages.len(), "classification started");

        for (index, stage) in self.config.stages.iter().enumerate() {
            if index > 0 && !self.commit_stage(epoch, &image, index) {
                return ClassifyOutcome::Superseded;
            }
            tracing::debug!(stage = %stage.name, "stage visible");
            tokio::time::sleep(stage.duration).await;
        }

        if self.data.read().epoch != epoch {
            return ClassifyOutcome::Superseded;
        }

        let reply = match tokio::time::timeout(
            self.config.remote_timeout,
            self.remote.classify(&image),
        )
        .await
        {
            Ok(reply) => reply,
            Err(_) => Err(TransportError::Timeout),
        };

        match reply {
            Ok(text) => match self.interpreter.interpret(&text) {
                Interpretation::Classified(verdict) => self.commit_success(epoch, image, verdict),
                Interpretation::ServiceError(text) => {
                    self.commit_service_error(epoch, image, text)
                }
            },
            Err(err) => self.commit_transport_failure(epoch, err),
        }
    }

    // ===== Internal transitions =====

    fn install_image(&self, image: ImagePayload) {
        let mut data = self.data.write();
        data.epoch = data.epoch.wrapping_add(1);
        data.drag_over = false;
        data.state = WorkflowState::ImageSelected {
            image: image.clone(),
        };
        drop(data);

        tracing::debug!(
            media_type = %image.media_type,
            bytes = image.bytes.len(),
            "image selected"
        );
        self.emit(&WorkflowState::ImageSelected { image });
    }

    /// Writes the next visible stage, unless the attempt went stale.
    fn commit_stage(&self, epoch: u64, image: &ImagePayload, stage: usize) -> bool {
        let mut data = self.data.write();
        if data.epoch != epoch {
            return false;
        }
        data.state = WorkflowState::Classifying {
            image: image.clone(),
            stage,
        };
        drop(data);

        self.emit(&WorkflowState::Classifying {
            image: image.clone(),
            stage,
        });
        true
    }

    fn commit_success(&self, epoch: u64, image: ImagePayload, verdict: Verdict) -> ClassifyOutcome {
        let mut data = self.data.write();
        if data.epoch != epoch {
            return ClassifyOutcome::Superseded;
        }
        data.state = WorkflowState::Succeeded {
            image,
            verdict: verdict.clone(),
        };
        let state = data.state.clone();
        drop(data);

        tracing::info!(
            label = %verdict.label,
            confidence = verdict.confidence_percent,
            "classification succeeded"
        );
        self.emit(&state);
        ClassifyOutcome::Classified(verdict)
    }

    /// Service-level failure: the image stays selected and only the
    /// in-flight presentation resets. The notice carries the reply text
    /// verbatim.
    fn commit_service_error(
        &self,
        epoch: u64,
        image: ImagePayload,
        text: String,
    ) -> ClassifyOutcome {
        let mut data = self.data.write();
        if data.epoch != epoch {
            return ClassifyOutcome::Superseded;
        }
        data.state = WorkflowState::ImageSelected { image };
        let state = data.state.clone();
        drop(data);

        tracing::warn!(reply = %text, "service reported an error");
        self.notify(Notice::error(text, self.config.service_error_auto_close));
        self.emit(&state);
        ClassifyOutcome::ServiceRejected
    }

    /// Transport failure: everything resets, the identity token
    /// regenerates, and the user starts over from intake.
    fn commit_transport_failure(&self, epoch: u64, err: TransportError) -> ClassifyOutcome {
        let mut data = self.data.write();
        if data.epoch != epoch {
            return ClassifyOutcome::Superseded;
        }
        data.epoch = data.epoch.wrapping_add(1);
        data.drag_over = false;
        data.input_token = data.input_token.next();
        data.state = WorkflowState::Idle;
        drop(data);

        tracing::warn!(error = %err, "transport failure");
        self.notify(Notice::error(
            format!("Error: {}", err),
            self.config.transport_error_auto_close,
        ));
        self.emit(&WorkflowState::Idle);
        ClassifyOutcome::TransportFailed
    }

    fn notify(&self, notice: Notice) {
        if let Some(sink) = &self.sink {
            sink.notify(notice);
        }
    }

    fn emit(&self, state: &WorkflowState) {
        if let Some(callback) = &self.on_state_change {
            callback(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::Label;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    struct FixedRemote {
        reply: Result<String, TransportError>,
    }

    impl FixedRemote {
        fn ok(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
            })
        }

        fn err(err: TransportError) -> Arc<Self> {
            Arc::new(Self { reply: Err(err) })
        }
    }

    #[async_trait]
    impl RemoteClassifier for FixedRemote {
        async fn classify(&self, _image: &ImagePayload) -> Result<String, TransportError> {
            self.reply.clone()
        }
    }

    struct SlowRemote {
        delay: Duration,
        reply: String,
    }

    #[async_trait]
    impl RemoteClassifier for SlowRemote {
        async fn classify(&self, _image: &ImagePayload) -> Result<String, TransportError> {
            tokio::time::sleep(self.delay).await;
            Ok(self.reply.clone())
        }
    }

    struct HungRemote;

    #[async_trait]
    impl RemoteClassifier for HungRemote {
        async fn classify(&self, _image: &ImagePayload) -> Result<String, TransportError> {
            std::future::pending().await
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        notices: Mutex<Vec<Notice>>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, notice: Notice) {
            self.notices.lock().push(notice);
        }
    }

    fn quick_config() -> WorkflowConfig {
        WorkflowConfig {
            stages: vec![
                Stage::new("Visual Analysis", Duration::ZERO),
                Stage::new("Text Processing", Duration::ZERO),
                Stage::new("Classification", Duration::ZERO),
            ],
            remote_timeout: Duration::from_secs(5),
            ..WorkflowConfig::default()
        }
    }

    fn sample_source() -> Option<FileSource> {
        Some(FileSource::new(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x10]).with_name("meme.jpg"))
    }

    // ==================== Selection Tests ====================

    #[test]
    fn starts_idle() {
        let workflow = Workflow::new(FixedRemote::ok("non-sexual"));
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(!workflow.is_drag_over());
    }

    #[test]
    fn select_file_moves_to_image_selected() {
        let workflow = Workflow::new(FixedRemote::ok("non-sexual"));
        workflow.select_file(sample_source()).unwrap();

        let state = workflow.state();
        assert_eq!(state.name(), "image_selected");
        let image = state.image().unwrap();
        assert_eq!(image.media_type, "image/jpeg");
        assert_eq!(image.file_name.as_deref(), Some("meme.jpg"));
    }

    #[test]
    fn select_file_declines_empty_handle() {
        let workflow = Workflow::new(FixedRemote::ok("non-sexual"));
        assert!(workflow.select_file(None).is_err());
        assert_eq!(workflow.state(), WorkflowState::Idle);
    }

    #[test]
    fn drop_accepts_images_only() {
        let workflow = Workflow::new(FixedRemote::ok("non-sexual"));

        workflow.drag_over();
        assert!(workflow.is_drag_over());
        let outcome = workflow.select_drop(DroppedItem::new("application/pdf", vec![1, 2]));
        assert_eq!(outcome, DropOutcome::Ignored);
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(!workflow.is_drag_over());

        workflow.drag_over();
        let outcome = workflow.select_drop(DroppedItem::new("image/png", vec![1, 2]));
        assert_eq!(outcome, DropOutcome::Accepted);
        assert_eq!(workflow.state().name(), "image_selected");
        assert!(!workflow.is_drag_over());
    }

    #[test]
    fn drag_leave_resets_flag() {
        let workflow = Workflow::new(FixedRemote::ok("non-sexual"));
        workflow.drag_over();
        workflow.drag_leave();
        assert!(!workflow.is_drag_over());
    }

    #[test]
    fn clear_regenerates_input_token() {
        let workflow = Workflow::new(FixedRemote::ok("non-sexual"));
        workflow.select_file(sample_source()).unwrap();

        let before = workflow.input_token();
        workflow.clear();
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert_ne!(workflow.input_token(), before);
    }

    #[test]
    fn selecting_does_not_touch_input_token() {
        let workflow = Workflow::new(FixedRemote::ok("non-sexual"));
        let before = workflow.input_token();
        workflow.select_file(sample_source()).unwrap();
        assert_eq!(workflow.input_token(), before);
    }

    // ==================== Classification Tests ====================

    #[tokio::test]
    async fn classify_without_image_is_no_image() {
        let workflow = Workflow::with_config(FixedRemote::ok("non-sexual"), quick_config());
        assert_eq!(workflow.classify().await, ClassifyOutcome::NoImage);
        assert_eq!(workflow.state(), WorkflowState::Idle);
    }

    #[tokio::test]
    async fn classify_produces_verdict() {
        let workflow =
            Workflow::with_config(FixedRemote::ok("Confidence: 92.3% sexual"), quick_config());
        workflow.select_file(sample_source()).unwrap();

        let outcome = workflow.classify().await;
        match outcome {
            ClassifyOutcome::Classified(verdict) => {
                assert_eq!(verdict.label, Label::Explicit);
                assert!((verdict.explicit_probability - 0.923).abs() < 1e-9);
            }
            other => panic!("expected a verdict, got {:?}", other),
        }

        let state = workflow.state();
        assert_eq!(state.name(), "succeeded");
        assert!(state.image().is_some());
        assert!(state.verdict().is_some());
    }

    #[tokio::test]
    async fn reclassify_after_success_is_allowed() {
        let workflow =
            Workflow::with_config(FixedRemote::ok("Confidence: 70% non-sexual"), quick_config());
        workflow.select_file(sample_source()).unwrap();

        assert!(matches!(
            workflow.classify().await,
            ClassifyOutcome::Classified(_)
        ));
        assert!(matches!(
            workflow.classify().await,
            ClassifyOutcome::Classified(_)
        ));
        assert_eq!(workflow.state().name(), "succeeded");
    }

    #[tokio::test]
    async fn second_trigger_while_in_flight_is_busy() {
        let remote = Arc::new(SlowRemote {
            delay: Duration::from_millis(500),
            reply: "Confidence: 60% non-sexual".to_string(),
        });
        let workflow = Arc::new(Workflow::with_config(remote, quick_config()));
        workflow.select_file(sample_source()).unwrap();

        let background = {
            let workflow = workflow.clone();
            tokio::spawn(async move { workflow.classify().await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(workflow.classify().await, ClassifyOutcome::Busy);
        assert!(matches!(
            background.await.expect("classification task panicked"),
            ClassifyOutcome::Classified(_)
        ));
    }

    #[tokio::test]
    async fn clear_supersedes_in_flight_attempt() {
        let remote = Arc::new(SlowRemote {
            delay: Duration::from_millis(500),
            reply: "Confidence: 60% sexual".to_string(),
        });
        let sink = Arc::new(RecordingSink::default());
        let workflow = Arc::new(
            Workflow::with_config(remote, quick_config()).with_notifications(sink.clone()),
        );
        workflow.select_file(sample_source()).unwrap();

        let background = {
            let workflow = workflow.clone();
            tokio::spawn(async move { workflow.classify().await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        workflow.clear();

        let outcome = background.await.expect("classification task panicked");
        assert_eq!(outcome, ClassifyOutcome::Superseded);
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(sink.notices.lock().is_empty());
    }

    #[tokio::test]
    async fn new_selection_supersedes_in_flight_attempt() {
        let remote = Arc::new(SlowRemote {
            delay: Duration::from_millis(300),
            reply: "Confidence: 60% sexual".to_string(),
        });
        let workflow = Arc::new(Workflow::with_config(remote, quick_config()));
        workflow.select_file(sample_source()).unwrap();

        let background = {
            let workflow = workflow.clone();
            tokio::spawn(async move { workflow.classify().await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        workflow
            .select_file(Some(FileSource::new(vec![9, 9, 9]).with_media_type("image/png")))
            .unwrap();

        let outcome = background.await.expect("classification task panicked");
        assert_eq!(outcome, ClassifyOutcome::Superseded);
        // The stale attempt must not overwrite the fresh selection.
        let state = workflow.state();
        assert_eq!(state.name(), "image_selected");
        assert_eq!(state.image().unwrap().bytes, vec![9, 9, 9]);
    }

    #[tokio::test]
    async fn hung_remote_resolves_to_transport_failure() {
        let sink = Arc::new(RecordingSink::default());
        let config = WorkflowConfig {
            remote_timeout: Duration::from_millis(50),
            ..quick_config()
        };
        let workflow = Workflow::with_config(Arc::new(HungRemote), config)
            .with_notifications(sink.clone());
        workflow.select_file(sample_source()).unwrap();

        assert_eq!(workflow.classify().await, ClassifyOutcome::TransportFailed);
        assert_eq!(workflow.state(), WorkflowState::Idle);

        let notices = sink.notices.lock();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].message.contains("timed out"));
    }

    #[tokio::test]
    async fn transport_failure_regenerates_input_token() {
        let workflow = Workflow::with_config(
            FixedRemote::err(TransportError::Network("network down".to_string())),
            quick_config(),
        );
        workflow.select_file(sample_source()).unwrap();
        let before = workflow.input_token();

        assert_eq!(workflow.classify().await, ClassifyOutcome::TransportFailed);
        assert_ne!(workflow.input_token(), before);
    }

    #[tokio::test]
    async fn state_change_callback_sees_every_transition() {
        let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let callback: OnStateChange = {
            let events = events.clone();
            Arc::new(move |state: &WorkflowState| {
                let entry = match state {
                    WorkflowState::Classifying { stage, .. } => format!("classifying:{}", stage),
                    other => other.name().to_string(),
                };
                events.lock().push(entry);
            })
        };

        let workflow =
            Workflow::with_config(FixedRemote::ok("Confidence: 80% non-sexual"), quick_config())
                .with_on_state_change(callback);
        workflow.select_file(sample_source()).unwrap();
        workflow.classify().await;
        workflow.clear();

        assert_eq!(
            *events.lock(),
            vec![
                "image_selected",
                "classifying:0",
                "classifying:1",
                "classifying:2",
                "succeeded",
                "idle",
            ]
        );
    }
}
