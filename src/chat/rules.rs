//! Offline rule-based assistant provider.
//!
//! Matches the user message against keyword groups and returns a canned
//! coping response. Works without any network or API key, so it is the
//! default provider.

use super::{ChatMessage, ChatProvider, ProviderReply};
use crate::Result;

/// One keyword-matched canned response.
struct Rule {
    keywords: &'static [&'static str],
    text: &'static str,
    suggestions: &'static [&'static str],
}

static RULES: &[Rule] = &[
    Rule {
        keywords: &["mareo", "desmay", "mareado"],
        text: "El miedo a desmayarse es muy común en el pánico, pero es importante saber que:

**¿Por qué sientes mareo?**
- La hiperventilación reduce el CO2, causando mareo
- La tensión muscular afecta el equilibrio
- La ansiedad altera la percepción

**Datos tranquilizadores:**
- Desmayarse por ansiedad es extremadamente raro
- El mareo es una sensación, no una señal de peligro real
- Tu cuerpo está diseñado para mantenerte consciente

**Técnica inmediata:**
1. Respira lentamente: 4 segundos inhalar, 6 exhalar
2. Siéntate si es posible
3. Recuerda: \"Es ansiedad, pasará\"",
        suggestions: &[
            "Técnicas de respiración",
            "¿Qué hacer en el momento?",
            "Evidencias de seguridad",
        ],
    },
    Rule {
        keywords: &["metro", "transporte", "tren", "autobús"],
        text: "El miedo en el transporte es muy tratable. Aquí tienes un plan paso a paso:

**¿Por qué da miedo?**
- Sensación de estar \"atrapado\"
- Multitudes y calor
- Falta de control sobre la situación

**Plan de exposición gradual:**
1. Semana 1: Ir a la estación, no subir
2. Semana 2: Subir 1 parada con acompañante
3. Semana 3: 2-3 paradas solo
4. Semana 4: Trayecto completo

**Kit de supervivencia:**
- Agua y chicle
- Música relajante
- Plan de escape (próxima parada)
- Frase clave: \"Puedo bajar en cualquier momento\"",
        suggestions: &[
            "Plan de exposición",
            "Técnicas en el momento",
            "Qué llevar conmigo",
        ],
    },
    Rule {
        keywords: &["taquicardia", "corazón", "palpitaciones"],
        text: "Las palpitaciones por ansiedad son molestas pero no peligrosas:

**¿Qué está pasando?**
- La adrenalina acelera el corazón naturalmente
- Es la respuesta \"lucha o huida\" activándose
- Tu corazón es fuerte y puede manejar esto

**Diferencia clave:**
- Ansiedad: ritmo rápido pero regular
- Problema cardíaco: ritmo irregular + otros síntomas

**Técnica 4-7-8:**
1. Inhala por la nariz 4 segundos
2. Mantén 7 segundos
3. Exhala por la boca 8 segundos
4. Repite 4 veces

**Reestructuración:**
\"Mi corazón late rápido porque mi cuerpo me está protegiendo, no porque esté en peligro\"",
        suggestions: &[
            "Más técnicas de calma",
            "¿Cuándo preocuparme?",
            "Ejercicios de relajación",
        ],
    },
    Rule {
        keywords: &["respiración", "respirar", "aire"],
        text: "La respiración es tu herramienta más poderosa contra la ansiedad:

**Técnica básica 4-6:**
- Inhala 4 segundos por la nariz
- Exhala 6 segundos por la boca
- El exhale más largo activa la relajación

**Respiración abdominal:**
1. Una mano en el pecho, otra en el abdomen
2. Solo debe moverse la mano del abdomen
3. Imagina inflar un globo en tu barriga

**Para hiperventilación:**
- Respira en una bolsa de papel 10 respiraciones
- O cubre boca y nariz con las manos
- Esto restaura el CO2 normal

**Practica 5 minutos diarios** cuando estés calmado, así será automático en crisis.",
        suggestions: &[
            "Otras técnicas de calma",
            "Ejercicios de relajación",
            "Grounding 5-4-3-2-1",
        ],
    },
    Rule {
        keywords: &["catastrofico", "catastrofe", "pensamiento", "peor"],
        text: "Los pensamientos catastrofistas son el combustible del pánico. Vamos a desarmarlos:

**Pasos para reestructurar:**

1. **Identifica el pensamiento:**
   \"¿Qué me estoy diciendo exactamente?\"

2. **Examina la evidencia:**
   - ¿Cuántas veces ha pasado realmente?
   - ¿Qué evidencia tengo a favor y en contra?

3. **Busca alternativas realistas:**
   - ¿Qué le dirías a un amigo?
   - ¿Cuál es la explicación más probable?

**Ejemplo:**
\"Me voy a desmayar y será horrible\"
-> \"Siento mareo, pero nunca me he desmayado. Puedo sentarme y respirar\"

**Pregunta clave:** \"¿Estoy prediciendo el futuro o describiendo lo que siento ahora?\"",
        suggestions: &[
            "Más ejemplos de reestructuración",
            "Técnicas de grounding",
            "Registro de pensamientos",
        ],
    },
];

const DEFAULT_TEXT: &str = "Entiendo tu preocupación. La ansiedad puede manifestarse de muchas formas diferentes.

Recuerda estos puntos clave:
- Los síntomas de ansiedad son temporales y no peligrosos
- La respiración profunda puede ayudar a calmar el sistema nervioso
- Cuestiona tus pensamientos: ¿qué evidencia tengo de que esto va a pasar?

¿Hay algún síntoma específico que te preocupe más?";

const DEFAULT_SUGGESTIONS: &[&str] = &[
    "Técnicas de respiración",
    "Síntomas físicos",
    "Pensamientos catastrofistas",
];

/// Keyword-matched canned-response provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedProvider;

impl RuleBasedProvider {
    /// Creates the provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ChatProvider for RuleBasedProvider {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn reply(&self, _history: &[ChatMessage], user: &str) -> Result<ProviderReply> {
        let lower = user.to_lowercase();

        let matched = RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)));

        let (text, suggestions) = match matched {
            Some(rule) => (rule.text, rule.suggestions),
            None => (DEFAULT_TEXT, DEFAULT_SUGGESTIONS),
        };

        Ok(ProviderReply {
            text: text.to_string(),
            suggestions: suggestions.iter().map(ToString::to_string).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(user: &str) -> ProviderReply {
        RuleBasedProvider::new().reply(&[], user).unwrap()
    }

    #[test]
    fn test_dizziness_keywords_match() {
        let r = reply("Siento mucho mareo en el trabajo");
        assert!(r.text.contains("Desmayarse por ansiedad es extremadamente raro"));
    }

    #[test]
    fn test_transport_keywords_match() {
        let r = reply("Me da pánico el metro");
        assert!(r.text.contains("exposición gradual"));
        assert!(r.suggestions.contains(&"Plan de exposición".to_string()));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let r = reply("TAQUICARDIA al correr");
        assert!(r.text.contains("Técnica 4-7-8"));
    }

    #[test]
    fn test_unmatched_message_gets_default() {
        let r = reply("hola");
        assert!(r.text.contains("Entiendo tu preocupación"));
        assert_eq!(r.suggestions.len(), 3);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // Both dizziness and breathing keywords present; the table order
        // decides.
        let r = reply("mareo al respirar");
        assert!(r.text.contains("Desmayarse por ansiedad"));
    }
}
