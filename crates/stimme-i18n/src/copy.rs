//! The copy tree itself. German is the source language; English mirrors it.

use std::sync::LazyLock;

use serde_json::{Value, json};

use crate::Lang;

pub(crate) fn tree(lang: Lang) -> &'static Value {
    match lang {
        Lang::De => &DE,
        Lang::En => &EN,
    }
}

static DE: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "brand": {
            "name": "AzubiStimme Pflege",
            "tagline": "Anonym. Sicher. Gemeinsam Ausbildung verbessern."
        },
        "nav": {
            "home": "Startseite",
            "about": "Über uns",
            "rights": "Rechte & Orientierung",
            "voices": "Anonyme Stimmen",
            "help": "Hilfeportal",
            "shareAnonymously": "Anonym teilen"
        },
        "home": {
            "hero": {
                "title": "Sprich darüber. Bleib geschützt. Lerne weiter.",
                "list": [
                    "Erfahrungen anonym teilen",
                    "Unterstützung bekommen",
                    "deine Rechte verstehen",
                    "und dazu beitragen, die Pflegeausbildung zu verbessern"
                ],
                "closing": "Du entscheidest selbst, was passiert. Du bist nicht allein."
            }
        },
        "voices": {
            "form": {
                "title": "Deine Erfahrung anonym teilen",
                "placeholder": "Beschreibe deine Erfahrung (mindestens 20 Zeichen)...",
                "tagsLabel": "Themen (optional, durch Komma getrennt, max. 5)",
                "submit": "Anonym absenden"
            },
            "list": {
                "title": "Anonyme Stimmen",
                "empty": "Noch keine veröffentlichten Stimmen.",
                "loadMore": "Mehr laden",
                "sortNewest": "Neueste zuerst",
                "sortOldest": "Älteste zuerst"
            }
        },
        "api": {
            "submit": {
                "pending": "Danke. Deine Nachricht wurde empfangen und erscheint nach der Prüfung.",
                "required": "Eine Nachricht ist erforderlich.",
                "tooShort": "Die Nachricht muss mindestens 20 Zeichen lang sein.",
                "tooLong": "Die Nachricht darf höchstens 2000 Zeichen lang sein."
            },
            "degraded": "Vorübergehend nicht verfügbar. Bitte versuche es später erneut."
        },
        "footer": {
            "mission": "Keine Pflege-Auszubildende und kein Pflege-Auszubildender soll still leiden.",
            "disclaimer": "Diese Plattform ist kein Notdienst. Wende dich in medizinischen oder rechtlichen Notfällen an die zuständigen Stellen."
        }
    })
});

static EN: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "brand": {
            "name": "AzubiStimme Pflege",
            "tagline": "Anonymous. Safe. Improving training together."
        },
        "nav": {
            "home": "Home",
            "about": "About Us",
            "rights": "Rights & Orientation",
            "voices": "Anonymous Voices",
            "help": "Help Portal",
            "shareAnonymously": "Share Anonymously"
        },
        "home": {
            "hero": {
                "title": "Speak up. Stay protected. Keep learning.",
                "list": [
                    "share experiences anonymously",
                    "get support",
                    "understand your rights",
                    "and help improve nursing training"
                ],
                "closing": "You decide what happens. You are not alone."
            }
        },
        "voices": {
            "form": {
                "title": "Share your experience anonymously",
                "placeholder": "Describe your experience (at least 20 characters)...",
                "tagsLabel": "Topics (optional, comma-separated, max. 5)",
                "submit": "Submit anonymously"
            },
            "list": {
                "title": "Anonymous Voices",
                "empty": "No published voices yet.",
                "loadMore": "Load more",
                "sortNewest": "Newest first",
                "sortOldest": "Oldest first"
            }
        },
        "api": {
            "submit": {
                "pending": "Thanks. Your message was received and will appear after review.",
                "required": "Message is required.",
                "tooShort": "Message must be at least 20 characters.",
                "tooLong": "Message must be less than 2000 characters."
            },
            "degraded": "Temporarily unavailable. Please try again later."
        },
        "footer": {
            "mission": "No nursing trainee should suffer in silence.",
            "disclaimer": "This platform is not emergency services. For immediate medical or legal emergencies, please contact the appropriate authorities."
        }
    })
});
