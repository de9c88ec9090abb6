/// Structured validation prompt. Asks for strict JSON so the primary
/// parse path is mechanical; the ladder in `parse` handles the rest.
pub(crate) fn validation_prompt(question: &str, answer: &str) -> String {
    format!(
        "Evalúa si la RESPUESTA cubre todos los aspectos de la PREGUNTA.\n\
         Enumera los sub-aspectos de la pregunta y verifica cada uno contra la respuesta.\n\
         Una respuesta que declara honestamente que la información no existe en el \
         contexto está COMPLETA (puntaje 1.0): se evalúa cobertura y honestidad, \
         no extensión.\n\n\
         PREGUNTA: {question}\n\n\
         RESPUESTA: {answer}\n\n\
         Responde SOLO con JSON:\n\
         {{\"completeness_score\": <0.0-1.0>, \
         \"missing_aspects\": [\"...\"], \
         \"confidence\": <0.0-1.0>}}"
    )
}

/// Merge prompt for answer enhancement. Preserves previously stated facts.
pub(crate) fn enhance_prompt(question: &str, original_answer: &str, new_context: &str) -> String {
    format!(
        "Mejora la respuesta original integrando la información adicional.\n\
         Conserva todos los hechos ya afirmados en la respuesta original; \
         no inventes nada que no esté en el contexto.\n\n\
         PREGUNTA: {question}\n\n\
         RESPUESTA ORIGINAL: {original_answer}\n\n\
         INFORMACIÓN ADICIONAL:\n{new_context}\n\n\
         Respuesta completa y coherente:"
    )
}
