//! English sentiment lexicon: `(word, polarity, subjectivity)`.
//!
//! Values follow the adjective scores of the pattern/TextBlob lexicon where
//! one exists; verbs, nouns, emoticons and emoji were added on the same
//! scale.

pub(crate) const ENTRIES: &[(&str, f64, f64)] = &[
    // positive
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("wonderful", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("superb", 1.0, 1.0),
    ("outstanding", 0.5, 0.675),
    ("brilliant", 0.9, 1.0),
    ("perfect", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("nice", 0.6, 1.0),
    ("lovely", 0.5, 0.75),
    ("beautiful", 0.85, 1.0),
    ("pretty", 0.25, 1.0),
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("pleased", 0.5, 1.0),
    ("joy", 0.8, 0.9),
    ("joyful", 0.8, 0.9),
    ("cheerful", 0.7, 0.8),
    ("delightful", 1.0, 1.0),
    ("pleasant", 0.733, 0.967),
    ("fun", 0.3, 0.2),
    ("funny", 0.25, 1.0),
    ("enjoy", 0.4, 0.5),
    ("enjoyable", 0.5, 0.6),
    ("love", 0.5, 0.6),
    ("like", 0.2, 0.4),
    ("adore", 0.7, 0.9),
    ("favorite", 0.5, 1.0),
    ("favourite", 0.5, 1.0),
    ("cool", 0.35, 0.65),
    ("incredible", 0.9, 0.9),
    ("impressive", 1.0, 1.0),
    ("remarkable", 0.75, 0.75),
    ("magnificent", 1.0, 1.0),
    ("marvelous", 1.0, 1.0),
    ("terrific", 1.0, 1.0),
    ("stunning", 0.5, 1.0),
    ("elegant", 0.5, 1.0),
    ("helpful", 0.5, 0.5),
    ("useful", 0.3, 0.0),
    ("reliable", 0.4, 0.6),
    ("efficient", 0.5, 0.5),
    ("effective", 0.6, 0.8),
    ("easy", 0.433, 0.833),
    ("smooth", 0.4, 0.6),
    ("fast", 0.2, 0.6),
    ("clean", 0.367, 0.683),
    ("fresh", 0.3, 0.5),
    ("friendly", 0.375, 0.5),
    ("kind", 0.6, 0.9),
    ("generous", 0.5, 0.6),
    ("smart", 0.214, 0.643),
    ("clever", 0.5, 1.0),
    ("interesting", 0.5, 0.5),
    ("exciting", 0.3, 0.8),
    ("excited", 0.375, 0.75),
    ("thrilled", 0.6, 0.9),
    ("grateful", 0.7, 0.8),
    ("thankful", 0.6, 0.8),
    ("thanks", 0.2, 0.2),
    ("recommend", 0.4, 0.5),
    ("success", 0.3, 0.4),
    ("successful", 0.75, 0.95),
    ("win", 0.8, 0.4),
    ("winner", 0.5, 0.5),
    ("positive", 0.227, 0.545),
    ("fine", 0.417, 0.5),
    ("ok", 0.5, 0.5),
    ("okay", 0.5, 0.5),
    ("decent", 0.167, 0.667),
    ("satisfied", 0.5, 1.0),
    ("satisfying", 0.5, 0.8),
    ("valuable", 0.5, 0.5),
    ("worth", 0.3, 0.1),
    ("peaceful", 0.5, 0.7),
    ("calm", 0.3, 0.75),
    ("safe", 0.5, 0.5),
    ("strong", 0.433, 0.733),
    ("hope", 0.3, 0.5),
    ("hopeful", 0.5, 0.6),
    ("proud", 0.8, 1.0),
    ("brave", 0.6, 0.7),
    ("fair", 0.7, 0.9),
    ("well", 0.3, 0.3),
    ("wow", 0.1, 1.0),
    ("yay", 0.5, 0.8),
    // negative
    ("bad", -0.7, 0.667),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("dreadful", -1.0, 1.0),
    ("poor", -0.4, 0.6),
    ("sad", -0.5, 1.0),
    ("unhappy", -0.6, 0.9),
    ("miserable", -1.0, 1.0),
    ("depressing", -0.7, 0.8),
    ("angry", -0.5, 1.0),
    ("annoying", -0.8, 0.9),
    ("annoyed", -0.4, 0.8),
    ("frustrating", -0.4, 0.8),
    ("frustrated", -0.7, 0.7),
    ("disappointing", -0.6, 0.7),
    ("disappointed", -0.75, 0.75),
    ("disappoint", -0.6, 0.7),
    ("hate", -0.8, 0.9),
    ("dislike", -0.3, 0.5),
    ("boring", -1.0, 1.0),
    ("bored", -0.5, 1.0),
    ("dull", -0.312, 0.625),
    ("ugly", -0.7, 1.0),
    ("stupid", -0.8, 1.0),
    ("dumb", -0.375, 0.5),
    ("useless", -0.5, 0.2),
    ("broken", -0.4, 0.4),
    ("slow", -0.3, 0.4),
    ("buggy", -0.5, 0.6),
    ("wrong", -0.5, 0.9),
    ("fail", -0.5, 0.3),
    ("failure", -0.316, 0.3),
    ("problem", -0.2, 0.3),
    ("crash", -0.4, 0.5),
    ("mess", -0.4, 0.6),
    ("waste", -0.2, 0.0),
    ("expensive", -0.5, 0.7),
    ("overpriced", -0.5, 0.6),
    ("difficult", -0.5, 1.0),
    ("hard", -0.292, 0.542),
    ("confusing", -0.3, 0.7),
    ("weird", -0.5, 1.0),
    ("scary", -0.5, 1.0),
    ("afraid", -0.6, 0.9),
    ("worried", -0.4, 0.7),
    ("nervous", -0.2, 0.5),
    ("painful", -0.7, 0.9),
    ("hurt", -0.4, 0.6),
    ("lonely", -0.5, 0.8),
    ("tired", -0.4, 0.7),
    ("sick", -0.714, 0.857),
    ("nasty", -1.0, 1.0),
    ("disgusting", -1.0, 1.0),
    ("pathetic", -1.0, 1.0),
    ("ridiculous", -0.333, 1.0),
    ("mediocre", -0.3, 0.5),
    ("negative", -0.3, 0.4),
    ("unfortunately", -0.5, 1.0),
    ("sorry", -0.5, 1.0),
    ("fake", -0.5, 1.0),
    ("scam", -0.8, 0.8),
    ("evil", -1.0, 1.0),
    ("cruel", -1.0, 1.0),
    ("unfair", -0.5, 0.9),
    ("rude", -0.3, 0.6),
    ("lazy", -0.25, 0.5),
    ("weak", -0.375, 0.625),
    ("dangerous", -0.6, 0.9),
    ("dirty", -0.6, 0.8),
    ("ugh", -0.5, 0.8),
    // emoticons
    (":)", 0.5, 1.0),
    (":-)", 0.5, 1.0),
    (":d", 1.0, 1.0),
    (":-d", 1.0, 1.0),
    (";)", 0.25, 1.0),
    ("<3", 0.5, 1.0),
    (":(", -0.75, 1.0),
    (":-(", -0.75, 1.0),
    (":'(", -1.0, 1.0),
    // emoji
    ("😊", 0.5, 0.6),
    ("😀", 0.5, 0.6),
    ("😃", 0.5, 0.6),
    ("😄", 0.6, 0.6),
    ("😁", 0.6, 0.6),
    ("😂", 0.5, 0.8),
    ("🤣", 0.5, 0.8),
    ("🙂", 0.3, 0.5),
    ("😍", 0.8, 0.9),
    ("🥰", 0.8, 0.9),
    ("😘", 0.6, 0.8),
    ("❤", 0.6, 0.7),
    ("👍", 0.4, 0.5),
    ("👏", 0.4, 0.5),
    ("🎉", 0.5, 0.6),
    ("🔥", 0.3, 0.6),
    ("😞", -0.6, 0.8),
    ("😢", -0.6, 0.8),
    ("😭", -0.8, 0.9),
    ("🙁", -0.4, 0.6),
    ("☹", -0.5, 0.7),
    ("😠", -0.7, 0.9),
    ("😡", -0.8, 0.9),
    ("👎", -0.5, 0.6),
    ("💔", -0.7, 0.8),
    ("🤮", -0.9, 1.0),
];

/// Entries that are verbs. Only their inflections (`-s`, `-ed`, `-ing`)
/// are matched through the stemmer; adjectives and nouns match exactly.
pub(crate) const VERBS: &[&str] = &[
    "love",
    "like",
    "hate",
    "enjoy",
    "adore",
    "recommend",
    "dislike",
    "disappoint",
    "hope",
    "win",
    "fail",
    "crash",
    "waste",
    "hurt",
];

/// Words that scale the next sentiment word.
pub(crate) const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("super", 1.3),
    ("so", 1.2),
    ("too", 1.2),
    ("truly", 1.2),
    ("absolutely", 1.4),
    ("totally", 1.3),
    ("quite", 1.1),
    ("highly", 1.3),
    ("most", 1.3),
    ("slightly", 0.6),
    ("somewhat", 0.7),
    ("barely", 0.5),
];

/// Words that invert the next sentiment word.
pub(crate) const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "without", "hardly", "cannot",
];
