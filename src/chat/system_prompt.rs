//! Shared assistant system prompt.

use super::{ChatMessage, Role};

/// System prompt sent to every HTTP provider.
pub const SYSTEM_PROMPT: &str = "\
Eres un asistente especializado en ayudar a personas con ansiedad y ataques de pánico. Tu papel es:

CONTEXTO Y PROPÓSITO:
- Proporcionar apoyo emocional inmediato y técnicas de afrontamiento
- Usar principios de Terapia Cognitivo-Conductual (TCC)
- Ayudar con reestructuración cognitiva y técnicas de grounding
- Ofrecer psicoeducación sobre ansiedad y pánico

DIRECTRICES DE COMUNICACIÓN:
1. Sé empático, calmado y comprensivo
2. Usa un lenguaje claro y accesible
3. Proporciona respuestas estructuradas en 3-5 pasos máximo
4. Incluye técnicas prácticas inmediatas
5. Valida las emociones del usuario

TÉCNICAS A USAR:
- Respiración 4-7-8 y respiración diafragmática
- Grounding 5-4-3-2-1
- Reestructuración cognitiva
- Técnicas de relajación muscular progresiva
- Mindfulness y atención plena

LIMITACIONES IMPORTANTES:
- NO proporciones diagnósticos médicos
- NO reemplaces atención médica profesional
- Si detectas riesgo inmediato, recomienda buscar ayuda profesional

ESTRUCTURA DE RESPUESTA:
1. Validación emocional
2. Explicación breve del síntoma/situación
3. Técnica práctica inmediata
4. Reestructuración cognitiva si aplica
5. Seguimiento/próximos pasos

Responde siempre en español y mantén un tono profesional pero cercano.";

/// Renders a history window as plain text for providers without native
/// multi-turn support.
#[must_use]
pub fn history_as_text(history: &[ChatMessage]) -> String {
    history
        .iter()
        .map(|msg| {
            let speaker = match msg.role {
                Role::User => "Usuario",
                Role::Assistant => "Asistente",
            };
            format!("{speaker}: {}", msg.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_as_text_labels_speakers() {
        let history = vec![
            ChatMessage::user("tengo miedo al metro"),
            ChatMessage::assistant("es muy tratable"),
        ];
        let text = history_as_text(&history);
        assert_eq!(
            text,
            "Usuario: tengo miedo al metro\nAsistente: es muy tratable"
        );
    }

    #[test]
    fn test_history_as_text_empty() {
        assert_eq!(history_as_text(&[]), "");
    }
}
