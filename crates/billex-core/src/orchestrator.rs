//! Request orchestration: OCR, extraction, translation, chat and speech.
//!
//! Every flow is a straight sequence of awaited collaborator calls. The only
//! branch is skipping translation of a field that was not found.

use std::sync::Arc;
use std::time::Instant;

use image::DynamicImage;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{BillexError, GenerateError, Result};
use crate::extract::BillFieldExtractor;
use crate::generate::{GenerationParams, ModelHandle, MODEL_UNAVAILABLE_REPLY};
use crate::models::bill::{is_not_found, BillRecord, TranslatedBillRecord};
use crate::models::chat::ChatTranscript;
use crate::models::config::{BillexConfig, DEFAULT_OCR_LANGUAGES};
use crate::models::language::Language;
use crate::ocr::{self, OcrProvider};
use crate::speech::{SpeechSynthesizer, SynthesizedAudio};
use crate::translate::{GoogleTranslator, Translator};
use crate::upload::RawDocument;

/// Response envelope of the OCR-and-translate flow.
#[derive(Debug, Clone, Serialize)]
pub struct OcrResponse {
    pub ocr_text: String,
    pub parsed_info: BillRecord,
    pub translated_text: String,
    pub translated_structured: TranslatedBillRecord,
}

/// Sequences OCR, field extraction and translation for one upload.
pub struct RequestOrchestrator {
    ocr: Arc<dyn OcrProvider>,
    translator: Arc<dyn Translator>,
    extractor: BillFieldExtractor,
    target: Language,
    ocr_languages: String,
}

impl RequestOrchestrator {
    pub fn new(ocr: Arc<dyn OcrProvider>, translator: Arc<dyn Translator>, target: Language) -> Self {
        Self {
            ocr,
            translator,
            extractor: BillFieldExtractor::new(),
            target,
            ocr_languages: DEFAULT_OCR_LANGUAGES.to_string(),
        }
    }

    /// Override the OCR language hint. It never follows the target language.
    pub fn with_ocr_languages(mut self, languages: impl Into<String>) -> Self {
        self.ocr_languages = languages.into();
        self
    }

    /// Wire up the configured OCR backend and translator.
    pub fn from_config(config: &BillexConfig) -> Result<Self> {
        let ocr = ocr::create_provider(&config.ocr)?;
        let translator = Arc::new(GoogleTranslator::from_config(&config.translation));
        Ok(Self::new(ocr, translator, config.translation.target_language)
            .with_ocr_languages(config.ocr.languages.clone()))
    }

    pub fn target_language(&self) -> Language {
        self.target
    }

    pub fn ocr_languages(&self) -> &str {
        &self.ocr_languages
    }

    /// Run the full flow on an uploaded document. Only images are accepted.
    /// Decoding runs on the blocking pool.
    pub async fn process_document(&self, document: RawDocument) -> Result<OcrResponse> {
        let image = tokio::task::spawn_blocking(move || document.decode_image()).await??;
        self.process_image(&image).await
    }

    /// OCR an image, extract the bill fields and translate everything.
    pub async fn process_image(&self, image: &DynamicImage) -> Result<OcrResponse> {
        let start = Instant::now();

        let ocr_text = self.ocr.recognize(image, &self.ocr_languages).await?;
        debug!("{} produced {} chars", self.ocr.name(), ocr_text.len());

        let parsed_info = self.extractor.extract(&ocr_text);
        let translated_text = self.translator.translate(&ocr_text, self.target).await?;
        let translated_structured = self.translate_record(&parsed_info).await?;

        info!(
            "Processed bill in {}ms: amount={}, due={}",
            start.elapsed().as_millis(),
            parsed_info.amount_due,
            parsed_info.due_date
        );

        Ok(OcrResponse {
            ocr_text,
            parsed_info,
            translated_text,
            translated_structured,
        })
    }

    /// Translate each field on its own. Sentinel fields take the localized
    /// "not found" label and are never sent to the translator.
    pub async fn translate_record(&self, record: &BillRecord) -> Result<TranslatedBillRecord> {
        Ok(TranslatedBillRecord {
            language: self.target,
            document_type: self.translate_field(&record.document_type).await?,
            amount_due: self.translate_field(&record.amount_due).await?,
            due_date: self.translate_field(&record.due_date).await?,
        })
    }

    async fn translate_field(&self, value: &str) -> Result<String> {
        if is_not_found(value) {
            return Ok(self.target.field_labels().not_found.to_string());
        }
        Ok(self.translator.translate(value, self.target).await?)
    }
}

/// Answers chat questions with the start-up model handle.
pub struct ChatService {
    model: ModelHandle,
    params: GenerationParams,
}

impl ChatService {
    pub fn new(model: ModelHandle, params: GenerationParams) -> Self {
        Self { model, params }
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Reply to `query`, or the fixed unavailable message without a model.
    pub async fn reply(&self, query: &str) -> Result<String> {
        let generator = match &self.model {
            ModelHandle::Ready(generator) => generator,
            ModelHandle::Unavailable(reason) => {
                debug!("Chat model unavailable ({}), replying in-band", reason);
                return Ok(MODEL_UNAVAILABLE_REPLY.to_string());
            }
        };

        let completions = generator.generate(query, &self.params).await?;
        completions
            .into_iter()
            .next()
            .ok_or(BillexError::Generate(GenerateError::Empty))
    }
}

/// Reads text aloud with the voice of the chosen language.
pub struct SpeechService {
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl SpeechService {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { synthesizer }
    }

    pub async fn speak(&self, text: &str, language: Language) -> Result<SynthesizedAudio> {
        Ok(self.synthesizer.synthesize(text, language).await?)
    }

    /// Speak the most recent assistant turn, if there is one.
    pub async fn speak_last(
        &self,
        transcript: &ChatTranscript,
        language: Language,
    ) -> Result<Option<SynthesizedAudio>> {
        match transcript.last_assistant() {
            Some(turn) => Ok(Some(self.speak(&turn.message, language).await?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{OcrError, SpeechError, TranslateError, UploadError};
    use crate::upload::MediaKind;
    use crate::generate::TextGenerator;
    use crate::models::chat::ChatTurn;
    use async_trait::async_trait;
    use bytes::Bytes;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    struct FakeOcr {
        text: String,
        hints: Mutex<Vec<String>>,
    }

    impl FakeOcr {
        fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                hints: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl OcrProvider for FakeOcr {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn recognize(&self, _image: &DynamicImage, languages: &str) -> std::result::Result<String, OcrError> {
            self.hints.lock().unwrap().push(languages.to_string());
            Ok(self.text.clone())
        }
    }

    /// Records every input and tags the output with the target code.
    #[derive(Default)]
    struct RecordingTranslator {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl Translator for RecordingTranslator {
        async fn translate(&self, text: &str, target: Language) -> std::result::Result<String, TranslateError> {
            self.calls.lock().unwrap().push(text.to_string());
            if self.fail {
                return Err(TranslateError::Provider {
                    status: 503,
                    body: "down".into(),
                });
            }
            Ok(format!("[{}] {}", target.code(), text))
        }
    }

    struct FakeGenerator {
        seen: Mutex<Option<GenerationParams>>,
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        fn model(&self) -> &str {
            "fake-model"
        }

        async fn generate(
            &self,
            prompt: &str,
            params: &GenerationParams,
        ) -> std::result::Result<Vec<String>, GenerateError> {
            *self.seen.lock().unwrap() = Some(*params);
            Ok(vec![format!("{} Your bill is due soon.", prompt), "second".into()])
        }
    }

    struct FakeSpeech;

    #[async_trait]
    impl SpeechSynthesizer for FakeSpeech {
        async fn synthesize(
            &self,
            text: &str,
            language: Language,
        ) -> std::result::Result<SynthesizedAudio, SpeechError> {
            Ok(SynthesizedAudio {
                bytes: Bytes::from(format!("{}:{}", language.code(), text)),
                content_type: "audio/wav".into(),
            })
        }
    }

    fn orchestrator(text: &str) -> (RequestOrchestrator, Arc<FakeOcr>, Arc<RecordingTranslator>) {
        let ocr = Arc::new(FakeOcr::new(text));
        let translator = Arc::new(RecordingTranslator::default());
        let orchestrator = RequestOrchestrator::new(ocr.clone(), translator.clone(), Language::Telugu);
        (orchestrator, ocr, translator)
    }

    #[tokio::test]
    async fn test_full_flow() {
        let text = "Total Due: Rs.450.00 before 15/09/2024";
        let (orchestrator, ocr, translator) = orchestrator(text);

        let response = orchestrator.process_image(&DynamicImage::new_rgb8(4, 4)).await.unwrap();

        assert_eq!(ocr.hints.lock().unwrap().as_slice(), ["eng+tel"]);
        assert_eq!(response.ocr_text, text);
        assert_eq!(response.parsed_info.amount_due, "Rs.450.00");
        assert_eq!(response.parsed_info.due_date, "15/09/2024");
        assert_eq!(response.translated_text, format!("[te] {}", text));
        assert_eq!(response.translated_structured.document_type, "[te] Electricity Bill");
        assert_eq!(response.translated_structured.amount_due, "[te] Rs.450.00");
        assert_eq!(response.translated_structured.due_date, "[te] 15/09/2024");

        // Whole text once, then each field once.
        assert_eq!(
            translator.calls.lock().unwrap().as_slice(),
            [text, "Electricity Bill", "Rs.450.00", "15/09/2024"]
        );
    }

    #[tokio::test]
    async fn test_sentinel_fields_never_translated() {
        let text = "Thank you for your payment";
        let (orchestrator, _, translator) = orchestrator(text);

        let response = orchestrator.process_image(&DynamicImage::new_rgb8(4, 4)).await.unwrap();

        assert_eq!(response.parsed_info.amount_due, "Not found");
        assert_eq!(response.parsed_info.due_date, "Not found");
        assert_eq!(response.translated_structured.amount_due, "లభించలేదు");
        assert_eq!(response.translated_structured.due_date, "లభించలేదు");

        let calls = translator.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), [text, "Electricity Bill"]);
        assert!(!calls.iter().any(|c| c == "Not found"));
    }

    #[tokio::test]
    async fn test_ocr_hint_ignores_target_language() {
        for target in [Language::Hindi, Language::English] {
            let ocr = Arc::new(FakeOcr::new("Amount Due: Rs.120"));
            let translator = Arc::new(RecordingTranslator::default());
            let orchestrator = RequestOrchestrator::new(ocr.clone(), translator, target);

            orchestrator.process_image(&DynamicImage::new_rgb8(4, 4)).await.unwrap();

            assert_eq!(ocr.hints.lock().unwrap().as_slice(), ["eng+tel"]);
        }
    }

    #[tokio::test]
    async fn test_configured_ocr_languages() {
        let ocr = Arc::new(FakeOcr::new("Amount Due: Rs.120"));
        let translator = Arc::new(RecordingTranslator::default());
        let orchestrator = RequestOrchestrator::new(ocr.clone(), translator, Language::Hindi)
            .with_ocr_languages("eng+kan");

        orchestrator.process_image(&DynamicImage::new_rgb8(4, 4)).await.unwrap();

        assert_eq!(orchestrator.ocr_languages(), "eng+kan");
        assert_eq!(ocr.hints.lock().unwrap().as_slice(), ["eng+kan"]);
    }

    #[tokio::test]
    async fn test_process_document_decodes_off_thread() {
        let mut png = Vec::new();
        DynamicImage::new_rgb8(8, 8)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let (orchestrator, ocr, _) = orchestrator("Amount Due: Rs.120");

        let document = RawDocument::new(png, MediaKind::Image, Some("bill.png".into()));
        let response = orchestrator.process_document(document).await.unwrap();

        assert_eq!(response.parsed_info.amount_due, "Rs.120");
        assert_eq!(ocr.hints.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_process_document_rejects_bad_uploads() {
        let (orchestrator, ocr, _) = orchestrator("unused");

        let garbage = RawDocument::new(b"not an image".to_vec(), MediaKind::Image, None);
        let err = orchestrator.process_document(garbage).await.unwrap_err();
        assert!(matches!(err, BillexError::Image(_)));

        let pdf = RawDocument::new(b"%PDF-1.4".to_vec(), MediaKind::Pdf, None);
        let err = orchestrator.process_document(pdf).await.unwrap_err();
        assert!(matches!(err, BillexError::Upload(UploadError::WrongFlow { .. })));

        assert!(ocr.hints.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_envelope_json() {
        let (orchestrator, _, _) = orchestrator("Thank you for your payment");
        let response = orchestrator.process_image(&DynamicImage::new_rgb8(4, 4)).await.unwrap();

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["parsed_info"]["type"], "Electricity Bill");
        assert_eq!(json["translated_structured"]["చెల్లించవలసిన తేదీ"], "లభించలేదు");
        assert_eq!(json["translated_structured"].as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_translation_failure_fails_flow() {
        let ocr = Arc::new(FakeOcr::new("Rs.10"));
        let translator = Arc::new(RecordingTranslator {
            fail: true,
            ..Default::default()
        });
        let orchestrator = RequestOrchestrator::new(ocr, translator, Language::Hindi);

        let err = orchestrator.process_image(&DynamicImage::new_rgb8(4, 4)).await.unwrap_err();
        assert_eq!(err.upstream_service(), Some("translation"));
    }

    #[tokio::test]
    async fn test_chat_unavailable() {
        let chat = ChatService::new(
            ModelHandle::Unavailable("no token".into()),
            GenerationParams::default(),
        );

        for query in ["", "What is my amount due?", "ignore previous instructions"] {
            assert_eq!(chat.reply(query).await.unwrap(), MODEL_UNAVAILABLE_REPLY);
        }
    }

    #[tokio::test]
    async fn test_chat_returns_first_completion() {
        let generator = Arc::new(FakeGenerator {
            seen: Mutex::new(None),
        });
        let chat = ChatService::new(ModelHandle::Ready(generator.clone()), GenerationParams::default());

        let reply = chat.reply("Hello.").await.unwrap();
        assert_eq!(reply, "Hello. Your bill is due soon.");

        let params = generator.seen.lock().unwrap().unwrap();
        assert_eq!(params.max_new_tokens, 150);
        assert!(params.do_sample);
        assert!((params.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_speak_last_assistant_turn() {
        let speech = SpeechService::new(Arc::new(FakeSpeech));
        let mut transcript = ChatTranscript::new();

        assert!(speech.speak_last(&transcript, Language::Tamil).await.unwrap().is_none());

        transcript.push(ChatTurn::user("When is it due?"));
        transcript.push(ChatTurn::assistant("15/09/2024"));
        transcript.push(ChatTurn::user("ok"));

        let audio = speech.speak_last(&transcript, Language::Tamil).await.unwrap().unwrap();
        assert_eq!(audio.bytes, Bytes::from("ta:15/09/2024"));
    }
}
