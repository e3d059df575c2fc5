//! Caption catalogs for the generated widgets

/// Literal strings placed into widget markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Captions {
    /// Submit button of choice and text exercises
    pub submit: &'static str,
    /// Submit button of self-progress exercises
    pub mark_as_done: &'static str,
    /// Title of an answer block
    pub answer: &'static str,
    /// Placeholder of single-line and plain text inputs
    pub answer_placeholder: &'static str,
    /// Placeholder of long text inputs
    pub detailed_answer_placeholder: &'static str,
}

const EN: Captions = Captions {
    submit: "Submit",
    mark_as_done: "Mark as done",
    answer: "Answer",
    answer_placeholder: "Enter your answer...",
    detailed_answer_placeholder: "Enter your detailed answer...",
};

const PT: Captions = Captions {
    submit: "Enviar",
    mark_as_done: "Marcar como concluído",
    answer: "Resposta",
    answer_placeholder: "Digite sua resposta...",
    detailed_answer_placeholder: "Digite sua resposta detalhada...",
};

const ES: Captions = Captions {
    submit: "Enviar",
    mark_as_done: "Marcar como hecho",
    answer: "Respuesta",
    answer_placeholder: "Escribe tu respuesta...",
    detailed_answer_placeholder: "Escribe tu respuesta detallada...",
};

const FR: Captions = Captions {
    submit: "Valider",
    mark_as_done: "Marquer comme terminé",
    answer: "Réponse",
    answer_placeholder: "Saisissez votre réponse...",
    detailed_answer_placeholder: "Saisissez votre réponse détaillée...",
};

const DE: Captions = Captions {
    submit: "Absenden",
    mark_as_done: "Als erledigt markieren",
    answer: "Antwort",
    answer_placeholder: "Antwort eingeben...",
    detailed_answer_placeholder: "Ausführliche Antwort eingeben...",
};

impl Captions {
    /// Catalog for a locale identifier such as `en`, `pt_BR` or `fr-CA`
    ///
    /// Only the primary language subtag is considered. Unknown locales get
    /// the English catalog.
    pub fn for_locale(locale: &str) -> Self {
        let primary = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match primary.as_str() {
            "pt" => PT,
            "es" => ES,
            "fr" => FR,
            "de" => DE,
            _ => EN,
        }
    }
}

impl Default for Captions {
    fn default() -> Self {
        EN
    }
}
