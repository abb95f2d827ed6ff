/// Number of titles the model is asked for
pub const RECOMMENDATION_COUNT: usize = 3;

/// Builds the generation prompt for a user's description of what they want
/// to watch.
///
/// The requested layout is the one `parser::parse_recommendations` reads:
/// a numbered `Title (Year) - Genre` header followed by a `Descripción:` line.
pub fn build_prompt(user_query: &str) -> String {
    let entries = (1..=RECOMMENDATION_COUNT)
        .map(|n| {
            format!(
                "{}. [Título] ([Año]) - [Género]\n   Descripción: [Breve explicación de por qué encaja con lo que busca]",
                n
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Eres un experto en recomendaciones de películas y series. Basándote en la siguiente \
descripción del usuario, proporciona exactamente {count} recomendaciones específicas de películas \
o series. Para cada recomendación incluye: título, género, año aproximado, y una breve descripción \
de por qué es perfecta para lo que busca el usuario.

Descripción del usuario: \"{query}\"

Formato de respuesta:
{entries}",
        count = RECOMMENDATION_COUNT,
        query = user_query,
        entries = entries,
    )
}
