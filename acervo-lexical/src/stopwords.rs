/// Fixed Spanish stopword list for the corpus language.
/// Tokens in this list never enter the vocabulary.
pub(crate) const STOPWORDS: &[&str] = &[
    "a", "al", "algo", "ante", "antes", "aquel", "aquella", "aquello", "así", "aun", "aunque",
    "bajo", "bien", "cada", "como", "con", "contra", "cual", "cuales", "cuando", "de", "del",
    "desde", "donde", "dos", "el", "ella", "ellas", "ellos", "en", "entre", "era", "eran", "es",
    "esa", "esas", "ese", "eso", "esos", "esta", "estas", "este", "esto", "estos", "fue", "fueron",
    "ha", "han", "hasta", "hay", "la", "las", "le", "les", "lo", "los", "más", "mas", "me", "mi",
    "mientras", "muy", "ni", "no", "nos", "nosotros", "o", "os", "otra", "otras", "otro", "otros",
    "para", "pero", "poco", "por", "porque", "que", "quien", "quienes", "se", "sea", "según",
    "ser", "si", "sí", "sin", "sobre", "son", "su", "sus", "también", "tan", "tanto", "te",
    "tiene", "tienen", "toda", "todas", "todo", "todos", "tras", "tu", "un", "una", "unas", "uno",
    "unos", "y", "ya",
];

pub(crate) fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}
