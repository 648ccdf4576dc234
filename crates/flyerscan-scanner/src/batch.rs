//! Batch scanning over an injected OCR engine
//!
//! The engine is initialized once per batch and terminated after the batch,
//! whether or not every image recognized. Each image is isolated: a
//! recognition failure (or timeout) marks that image failed and the batch
//! moves on, so one unreadable photo does not discard the rest of the upload.
//! Engine initialization failure is the exception — nothing has been
//! recognized yet, so the whole call aborts with no outcomes.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use flyerscan_core::models::{EventDraft, ImageRef, RawScan};
use flyerscan_core::ocr::{OcrEngine, OcrError, ProgressSink};
use flyerscan_core::{AppError, ScannerConfig};
use flyerscan_extract::DraftAssembler;

/// Result of processing one image in a batch.
#[derive(Debug)]
pub enum ScanOutcome {
    Drafted(EventDraft),
    Failed { image: ImageRef, reason: String },
}

impl ScanOutcome {
    pub fn into_draft(self) -> Option<EventDraft> {
        match self {
            ScanOutcome::Drafted(draft) => Some(draft),
            ScanOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ScanOutcome::Failed { .. })
    }
}

pub struct BatchScanner {
    engine: Arc<dyn OcrEngine>,
    assembler: DraftAssembler,
    config: ScannerConfig,
}

impl BatchScanner {
    pub fn new(engine: Arc<dyn OcrEngine>, config: ScannerConfig) -> Result<Self, AppError> {
        config.validate()?;
        let assembler = DraftAssembler::new().map_err(AppError::Extraction)?;
        Ok(Self {
            engine,
            assembler,
            config,
        })
    }

    /// Scan a batch of images sequentially, one outcome per image in input
    /// order.
    ///
    /// `on_progress` receives percent values (0..=100) relayed from the OCR
    /// engine for the image **currently** being recognized. The value resets
    /// for every image; it is not cumulative across the batch.
    pub async fn scan_batch(
        &self,
        images: &[ImageRef],
        on_progress: impl Fn(f32) + Send + Sync + 'static,
    ) -> Result<Vec<ScanOutcome>, AppError> {
        self.engine
            .initialize(&self.config.ocr_language)
            .await
            .map_err(AppError::Ocr)?;
        info!(
            images = images.len(),
            language = %self.config.ocr_language,
            "starting batch scan"
        );

        let relay: Arc<dyn Fn(f32) + Send + Sync> = Arc::new(on_progress);
        let per_image = Duration::from_secs(self.config.ocr_timeout_secs);
        let mut outcomes = Vec::with_capacity(images.len());

        for image in images {
            outcomes.push(self.scan_one(image, relay.clone(), per_image).await);
        }

        // The batch already has its outcomes; teardown noise is logged, not
        // propagated.
        if let Err(err) = self.engine.terminate().await {
            warn!(error = %err, "OCR engine teardown failed after batch");
        }

        let failed = outcomes.iter().filter(|o| o.is_failed()).count();
        info!(
            images = images.len(),
            drafted = images.len() - failed,
            failed,
            "batch scan complete"
        );
        Ok(outcomes)
    }

    async fn scan_one(
        &self,
        image: &ImageRef,
        relay: Arc<dyn Fn(f32) + Send + Sync>,
        per_image: Duration,
    ) -> ScanOutcome {
        let sink: ProgressSink = Arc::new(move |fraction: f32| {
            relay(fraction.clamp(0.0, 1.0) * 100.0);
        });

        match timeout(per_image, self.engine.recognize(image, sink)).await {
            Ok(Ok(text)) => {
                debug!(image = %image, chars = text.len(), "image recognized");
                let scan = RawScan::new(image.clone(), text);
                ScanOutcome::Drafted(self.assembler.assemble(&scan))
            }
            Ok(Err(err)) => {
                warn!(image = %image, error = %err, "recognition failed");
                ScanOutcome::Failed {
                    image: image.clone(),
                    reason: err.to_string(),
                }
            }
            Err(_) => {
                let err = OcrError::Timeout {
                    image: image.clone(),
                    timeout_secs: per_image.as_secs(),
                };
                warn!(image = %image, error = %err, "recognition timed out");
                ScanOutcome::Failed {
                    image: image.clone(),
                    reason: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// Scripted OCR engine: per-image text, optional failures, and a record
    /// of lifecycle calls.
    #[derive(Default)]
    struct ScriptedEngine {
        texts: Vec<(&'static str, &'static str)>,
        fail_init: bool,
        fail_image: Option<&'static str>,
        hang_image: Option<&'static str>,
        initialized: AtomicBool,
        terminated: AtomicBool,
    }

    #[async_trait]
    impl OcrEngine for ScriptedEngine {
        async fn initialize(&self, _language: &str) -> Result<(), OcrError> {
            if self.fail_init {
                return Err(OcrError::Init("no language data".to_string()));
            }
            self.initialized.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn recognize(
            &self,
            image: &ImageRef,
            progress: ProgressSink,
        ) -> Result<String, OcrError> {
            if self.hang_image == Some(image.as_str()) {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            if self.fail_image == Some(image.as_str()) {
                return Err(OcrError::Recognize {
                    image: image.clone(),
                    reason: "unreadable image".to_string(),
                });
            }
            progress(0.5);
            progress(1.0);
            let text = self
                .texts
                .iter()
                .find(|(name, _)| *name == image.as_str())
                .map(|(_, text)| *text)
                .unwrap_or_default();
            Ok(text.to_string())
        }

        async fn terminate(&self) -> Result<(), OcrError> {
            self.terminated.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn images(names: &[&str]) -> Vec<ImageRef> {
        names.iter().map(|name| ImageRef::new(*name)).collect()
    }

    fn scanner(engine: Arc<ScriptedEngine>) -> BatchScanner {
        BatchScanner::new(engine, ScannerConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_batch_drafts_every_image() {
        let engine = Arc::new(ScriptedEngine {
            texts: vec![
                ("a.jpg", "NEON NIGHTS TOUR\nJuly 4, 2024\nDOORS 7PM"),
                ("b.jpg", "OPEN MIC\nat the Blue Door"),
            ],
            ..Default::default()
        });
        let outcomes = scanner(engine.clone())
            .scan_batch(&images(&["a.jpg", "b.jpg"]), |_| {})
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 2);
        let drafts: Vec<EventDraft> = outcomes
            .into_iter()
            .filter_map(ScanOutcome::into_draft)
            .collect();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].title, "NEON NIGHTS");
        assert_eq!(drafts[1].location.as_deref(), Some("Blue Door"));
        assert!(engine.initialized.load(Ordering::SeqCst));
        assert!(engine.terminated.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_init_failure_aborts_with_zero_outcomes() {
        let engine = Arc::new(ScriptedEngine {
            fail_init: true,
            ..Default::default()
        });
        let result = scanner(engine.clone())
            .scan_batch(&images(&["a.jpg", "b.jpg"]), |_| {})
            .await;

        assert!(matches!(result, Err(AppError::Ocr(OcrError::Init(_)))));
        assert!(!engine.terminated.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_one_bad_image_is_isolated() {
        let engine = Arc::new(ScriptedEngine {
            texts: vec![("a.jpg", "SHOW ONE"), ("c.jpg", "SHOW TWO")],
            fail_image: Some("b.jpg"),
            ..Default::default()
        });
        let outcomes = scanner(engine.clone())
            .scan_batch(&images(&["a.jpg", "b.jpg", "c.jpg"]), |_| {})
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 3);
        assert!(!outcomes[0].is_failed());
        assert!(outcomes[1].is_failed());
        assert!(!outcomes[2].is_failed());
        assert!(engine.terminated.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stuck_recognition_times_out() {
        let engine = Arc::new(ScriptedEngine {
            texts: vec![("b.jpg", "STILL HERE")],
            hang_image: Some("a.jpg"),
            ..Default::default()
        });
        let outcomes = scanner(engine)
            .scan_batch(&images(&["a.jpg", "b.jpg"]), |_| {})
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 2);
        match &outcomes[0] {
            ScanOutcome::Failed { reason, .. } => assert!(reason.contains("exceeded")),
            other => panic!("expected timeout failure, got {other:?}"),
        }
        assert!(!outcomes[1].is_failed());
    }

    #[tokio::test]
    async fn test_progress_relayed_as_percent() {
        let engine = Arc::new(ScriptedEngine {
            texts: vec![("a.jpg", "anything")],
            ..Default::default()
        });
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        scanner(engine)
            .scan_batch(&images(&["a.jpg"]), move |pct| {
                sink.lock().unwrap().push(pct);
            })
            .await
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![50.0, 100.0]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let engine = Arc::new(ScriptedEngine::default());
        let config = ScannerConfig {
            ocr_timeout_secs: 0,
            ..ScannerConfig::default()
        };
        assert!(matches!(
            BatchScanner::new(engine, config),
            Err(AppError::InvalidInput(_))
        ));
    }
}
