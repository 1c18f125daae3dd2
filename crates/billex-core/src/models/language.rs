//! Supported languages and their localized strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five languages the explainer can present and speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hindi,
    #[default]
    Telugu,
    Tamil,
    Malayalam,
}

/// Static UI strings for the language selector.
#[derive(Debug, Clone, Serialize)]
pub struct UiStrings {
    pub title: &'static str,
    pub upload: &'static str,
    pub chat: &'static str,
    pub input: &'static str,
    pub speak: &'static str,
    /// Template with a single `{}` placeholder for the user's question.
    pub ai_reply: &'static str,
}

/// Localized labels for the structured bill fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLabels {
    pub document_type: &'static str,
    pub amount_due: &'static str,
    pub due_date: &'static str,
    pub not_found: &'static str,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Hindi,
        Language::Telugu,
        Language::Tamil,
        Language::Malayalam,
    ];

    /// ISO 639-1 code, as understood by the translation provider.
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Telugu => "te",
            Self::Tamil => "ta",
            Self::Malayalam => "ml",
        }
    }

    /// Tesseract traineddata name.
    pub fn tesseract_code(self) -> &'static str {
        match self {
            Self::English => "eng",
            Self::Hindi => "hin",
            Self::Telugu => "tel",
            Self::Tamil => "tam",
            Self::Malayalam => "mal",
        }
    }

    /// Label shown in the language selector.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "हिंदी (Hindi)",
            Self::Telugu => "తెలుగు (Telugu)",
            Self::Tamil => "தமிழ் (Tamil)",
            Self::Malayalam => "മലയാളം (Malayalam)",
        }
    }

    /// Hugging Face model id of the speech voice.
    pub fn tts_model(self) -> &'static str {
        match self {
            Self::Hindi => "ai4bharat/indic-tts-hi",
            Self::Telugu => "ai4bharat/indic-tts-te",
            Self::Tamil => "ai4bharat/indic-tts-ta",
            Self::Malayalam => "ai4bharat/indic-tts-ml",
            Self::English => "facebook/mms-tts-eng",
        }
    }

    pub fn field_labels(self) -> FieldLabels {
        match self {
            Self::English => FieldLabels {
                document_type: "Bill type",
                amount_due: "Amount due",
                due_date: "Due date",
                not_found: "Not found",
            },
            Self::Hindi => FieldLabels {
                document_type: "बिल का प्रकार",
                amount_due: "देय राशि",
                due_date: "देय तिथि",
                not_found: "नहीं मिला",
            },
            Self::Telugu => FieldLabels {
                document_type: "బిల్లు రకం",
                amount_due: "చెల్లించవలసిన మొత్తం",
                due_date: "చెల్లించవలసిన తేదీ",
                not_found: "లభించలేదు",
            },
            Self::Tamil => FieldLabels {
                document_type: "பில் வகை",
                amount_due: "செலுத்த வேண்டிய தொகை",
                due_date: "செலுத்த வேண்டிய தேதி",
                not_found: "கிடைக்கவில்லை",
            },
            Self::Malayalam => FieldLabels {
                document_type: "ബില്ലിന്റെ തരം",
                amount_due: "അടയ്ക്കേണ്ട തുക",
                due_date: "അടയ്ക്കേണ്ട തീയതി",
                not_found: "ലഭ്യമല്ല",
            },
        }
    }

    pub fn ui_strings(self) -> UiStrings {
        match self {
            Self::English => UiStrings {
                title: "📑 Local Language Bill Explainer",
                upload: "Upload your bill",
                chat: "💬 Ask Questions About Your Bill",
                input: "Type your question here:",
                speak: "🔊 Speak Response",
                ai_reply: "This is a sample AI reply to your question: '{}'",
            },
            Self::Hindi => UiStrings {
                title: "📑 स्थानीय भाषा बिल व्याख्याकार",
                upload: "अपना बिल अपलोड करें",
                chat: "💬 अपने बिल के बारे में प्रश्न पूछें",
                input: "यहाँ अपना प्रश्न लिखें:",
                speak: "🔊 उत्तर सुनें",
                ai_reply: "यह आपका प्रश्न '{}' का उत्तर यहाँ है।",
            },
            Self::Telugu => UiStrings {
                title: "📑 స్థానిక భాష బిల్ వివరణ",
                upload: "మీ బిల్‌ను అప్లోడ్ చేయండి",
                chat: "💬 మీ బిల్ గురించి ప్రశ్నలు అడగండి",
                input: "ఇక్కడ మీ ప్రశ్న టైప్ చేయండి:",
                speak: "🔊 సమాధానం వినండి",
                ai_reply: "మీ ప్రశ్న '{}' కు సమాధానం ఇక్కడ ఉంది.",
            },
            Self::Tamil => UiStrings {
                title: "📑 உள்ளூர் மொழி பில் விளக்கம்",
                upload: "உங்கள் பில் பதிவேற்றவும்",
                chat: "💬 உங்கள் பில் பற்றி கேள்விகள் கேளுங்கள்",
                input: "இங்கே உங்கள் கேள்வியை எழுதுங்கள்:",
                speak: "🔊 பதிலை கேளுங்கள்",
                ai_reply: "உங்கள் கேள்வி '{}' க்கு பதில் இங்கே உள்ளது.",
            },
            Self::Malayalam => UiStrings {
                title: "📑 പ്രാദേശിക ഭാഷ ബിൽ വിശദീകരണം",
                upload: "നിങ്ങളുടെ ബിൽ അപ്ലോഡ് ചെയ്യുക",
                chat: "💬 നിങ്ങളുടെ ബിൽ സംബന്ധിച്ച് ചോദ്യങ്ങൾ ചോദിക്കുക",
                input: "ഇവിടെ നിങ്ങളുടെ ചോദ്യമിടുക",
                speak: "🔊 ഉത്തരം കേൾക്കുക",
                ai_reply: "നിങ്ങളുടെ ചോദ്യം '{}' ന് മറുപടി ഇവിടെ കാണുന്നു.",
            },
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error for unrecognized language names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Accepts ISO codes, English names, and the selector labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        let lower = needle.to_lowercase();

        for lang in Language::ALL {
            if lower == lang.code()
                || lower == lang.tesseract_code()
                || needle == lang.display_name()
                || lower == format!("{:?}", lang).to_lowercase()
            {
                return Ok(lang);
            }
        }

        // Selector labels may arrive with only the native script part.
        Language::ALL
            .into_iter()
            .find(|lang| {
                lang.display_name()
                    .split(" (")
                    .next()
                    .is_some_and(|native| native == needle)
            })
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}
