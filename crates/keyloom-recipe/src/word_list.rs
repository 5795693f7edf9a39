//! Curated word lists for password rendering.
//!
//! Each curated list has a power-of-two length so a list id fixes the
//! bits of entropy each word carries (512 words = 9 bits, 256 words =
//! 8 bits). The lists are part of the derivation format: reordering,
//! adding or removing a word would change every password ever derived
//! against that id, so the arrays below are frozen.
//!
//! Callers may also bring their own list as free text; see
//! [`WordList::from_text`].

use std::fmt;

/// Identifier of a curated word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordListId {
    /// 512 five-letter words, 9 bits per word. The default.
    #[default]
    En512,
    /// 256 four-letter words, 8 bits per word.
    En256,
}

impl WordListId {
    /// Parse the JSON `wordList` field value.
    pub fn from_field(value: &str) -> Option<Self> {
        match value {
            "EN_512" => Some(Self::En512),
            "EN_256" => Some(Self::En256),
            _ => None,
        }
    }

    /// Canonical field value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En512 => "EN_512",
            Self::En256 => "EN_256",
        }
    }

    /// The words behind this id.
    pub fn words(self) -> &'static [&'static str] {
        match self {
            Self::En512 => &EN_512,
            Self::En256 => &EN_256,
        }
    }
}

impl fmt::Display for WordListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A word list a password can be rendered against: a curated list or a
/// caller-supplied one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordList {
    /// One of the frozen curated lists.
    Curated(WordListId),
    /// A literal list supplied by the caller.
    Custom(Vec<String>),
}

impl WordList {
    /// Parse a caller-supplied literal word list.
    ///
    /// The text is split on runs of non-alphabetic characters; anything
    /// else (commas, newlines, digits, punctuation) separates words.
    /// Returns `None` when no words remain.
    pub fn from_text(text: &str) -> Option<Self> {
        let words: Vec<String> = text
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| !w.is_empty())
            .map(str::to_owned)
            .collect();
        if words.is_empty() { None } else { Some(Self::Custom(words)) }
    }

    /// Number of words in the list.
    pub fn len(&self) -> usize {
        match self {
            Self::Curated(id) => id.words().len(),
            Self::Custom(words) => words.len(),
        }
    }

    /// True when the list holds no words (never the case for curated
    /// lists).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Word at `index`.
    pub fn word(&self, index: usize) -> &str {
        match self {
            Self::Curated(id) => id.words()[index],
            Self::Custom(words) => &words[index],
        }
    }

    /// Entropy carried per word: log2 of the list length.
    pub fn bits_per_word(&self) -> f64 {
        (self.len() as f64).log2()
    }
}

impl Default for WordList {
    fn default() -> Self {
        Self::Curated(WordListId::default())
    }
}

/// 512 five-letter words, 9 bits of entropy per word.
pub static EN_512: [&str; 512] = [
    "abide", "about", "above", "abuse", "actor", "acute", "admit", "adopt",
    "adult", "after", "again", "agent", "agree", "ahead", "alarm", "album",
    "alert", "alike", "alive", "allow", "aloha", "alone", "along", "alter",
    "amber", "amend", "ample", "angel", "anger", "angle", "ankle", "apart",
    "apple", "apply", "arena", "argue", "arise", "armor", "aroma", "array",
    "arrow", "aside", "asset", "atlas", "audio", "audit", "avoid", "awake",
    "award", "aware", "badge", "badly", "bagel", "baker", "basic", "basin",
    "batch", "beach", "beard", "beast", "began", "begin", "being", "belly",
    "below", "bench", "berry", "birth", "black", "blade", "blame", "blank",
    "blast", "blaze", "bleak", "blend", "bless", "blink", "block", "bloom",
    "blunt", "blush", "board", "boast", "bonus", "boost", "booth", "bound",
    "brain", "brake", "brand", "brave", "bread", "break", "brick", "bride",
    "brief", "bring", "brink", "brisk", "broad", "broke", "brook", "broom",
    "brown", "brush", "build", "bunch", "burst", "cabin", "cable", "camel",
    "candy", "canoe", "cargo", "carry", "carve", "catch", "cause", "cedar",
    "chain", "chair", "chalk", "charm", "chart", "chase", "cheap", "check",
    "cheek", "cheer", "chess", "chest", "chief", "child", "chill", "choir",
    "chord", "chose", "cider", "cigar", "cinch", "civic", "civil", "claim",
    "clamp", "clash", "clasp", "class", "clean", "clerk", "click", "cliff",
    "climb", "cling", "cloak", "clock", "close", "cloth", "cloud", "clown",
    "coach", "coast", "cobra", "cocoa", "colon", "color", "comet", "comic",
    "coral", "couch", "count", "court", "cover", "crack", "craft", "crane",
    "crash", "crate", "crawl", "crazy", "cream", "creek", "crepe", "crest",
    "crisp", "cross", "crowd", "crown", "crumb", "crush", "curve", "cycle",
    "daily", "dairy", "daisy", "dance", "dealt", "debut", "decay", "decor",
    "delay", "delta", "denim", "dense", "depth", "derby", "devil", "diary",
    "digit", "diner", "dirty", "ditch", "dodge", "donor", "donut", "dough",
    "dozen", "draft", "drain", "drama", "drank", "dream", "dress", "dried",
    "drift", "drill", "drink", "drive", "drove", "drums", "dusty", "dwell",
    "eager", "eagle", "early", "earth", "easel", "eight", "elbow", "elder",
    "elect", "elite", "email", "ember", "empty", "enemy", "enjoy", "enter",
    "entry", "equal", "equip", "erase", "error", "essay", "event", "every",
    "exact", "exile", "exist", "extra", "fable", "faint", "fairy", "faith",
    "false", "fancy", "fatal", "favor", "feast", "fence", "ferry", "fever",
    "fiber", "field", "fifth", "fifty", "fight", "final", "first", "flame",
    "flash", "fleet", "flesh", "float", "flock", "flood", "floor", "flour",
    "fluid", "flush", "flute", "foamy", "focus", "foggy", "force", "forge",
    "forth", "forty", "forum", "found", "frame", "fresh", "front", "frost",
    "fruit", "fudge", "fully", "fungi", "funny", "gauge", "gecko", "genre",
    "ghost", "giant", "given", "glare", "glass", "gleam", "glide", "globe",
    "gloom", "glory", "glove", "going", "goose", "grace", "grade", "grain",
    "grand", "grant", "grape", "graph", "grasp", "grass", "grave", "great",
    "green", "greet", "grief", "grill", "grimy", "grind", "groan", "groom",
    "group", "grove", "grown", "guard", "guess", "guest", "guide", "habit",
    "handy", "happy", "hardy", "harsh", "haste", "hatch", "haven", "hazel",
    "heart", "heavy", "hedge", "hefty", "hello", "hence", "herbs", "hobby",
    "hoist", "honey", "honor", "horse", "hotel", "house", "hover", "human",
    "humid", "humor", "hurry", "ideal", "image", "imply", "index", "inner",
    "input", "irony", "issue", "ivory", "jelly", "jewel", "joint", "jolly",
    "judge", "juice", "juicy", "jumbo", "kneel", "knife", "knock", "known",
    "label", "labor", "large", "laser", "latch", "later", "laugh", "layer",
    "learn", "lease", "least", "leave", "ledge", "legal", "lemon", "level",
    "light", "lilac", "limbs", "limit", "linen", "liver", "lobby", "local",
    "lodge", "logic", "loose", "lorry", "lower", "loyal", "lucky", "lunar",
    "lunch", "lyric", "magic", "major", "mango", "maple", "march", "marsh",
    "match", "maybe", "mayor", "meant", "medal", "media", "melon", "mercy",
    "merge", "merit", "merry", "metal", "meter", "midst", "might", "mimic",
    "minor", "minus", "mirth", "model", "moist", "money", "month", "moral",
    "motor", "mound", "mount", "mouse", "mouth", "movie", "mural", "music",
    "naive", "nasal", "naval", "nerve", "never", "newly", "night", "ninth",
    "noble", "noise", "north", "notch", "novel", "nurse", "nylon", "oasis",
    "occur", "ocean", "offer", "often", "olive", "onion", "onset", "opera",
    "orbit", "order", "organ", "other", "otter", "ought", "ounce", "outer",
    "owner", "oxide", "ozone", "payee", "petty", "roman", "snare", "stole",
];

/// 256 four-letter words, 8 bits of entropy per word.
pub static EN_256: [&str; 256] = [
    "able", "acid", "aged", "also", "area", "arms", "atom", "aunt",
    "axis", "baby", "back", "bake", "ball", "band", "bank", "barn",
    "base", "bath", "beam", "bean", "bear", "beat", "bell", "belt",
    "bend", "best", "bike", "bird", "bite", "blue", "boat", "body",
    "boil", "bold", "bolt", "bone", "book", "boot", "born", "both",
    "bowl", "brew", "brim", "busy", "cake", "calm", "camp", "cape",
    "card", "care", "cart", "case", "cash", "cast", "cave", "cell",
    "chat", "chef", "chin", "chip", "city", "clay", "clip", "club",
    "coal", "coat", "code", "coin", "cold", "cook", "cool", "cope",
    "copy", "cord", "cork", "corn", "cost", "cozy", "crab", "crew",
    "crop", "cube", "curb", "cure", "curl", "dare", "dark", "dart",
    "dawn", "dear", "deck", "deep", "deer", "desk", "dial", "dice",
    "diet", "dish", "dive", "dock", "dome", "door", "dose", "down",
    "draw", "drop", "drum", "duck", "dune", "dusk", "dust", "duty",
    "each", "earn", "east", "easy", "echo", "edge", "envy", "epic",
    "even", "exam", "exit", "face", "fact", "fade", "fair", "fall",
    "fame", "farm", "fast", "fate", "fawn", "fear", "feed", "feel",
    "fern", "file", "film", "find", "fine", "fire", "firm", "fish",
    "five", "flag", "flat", "flew", "flip", "flow", "foam", "fold",
    "folk", "fond", "font", "food", "foot", "fork", "form", "fort",
    "four", "free", "frog", "from", "fuel", "full", "fund", "gain",
    "game", "gate", "gave", "gaze", "gear", "gift", "give", "glad",
    "glow", "glue", "goal", "goat", "gold", "golf", "gone", "good",
    "gown", "grab", "gray", "grew", "grid", "grip", "grow", "gulf",
    "hail", "hair", "half", "hall", "hand", "hang", "harm", "hawk",
    "heal", "heap", "hear", "heat", "heel", "help", "herb", "herd",
    "hero", "hide", "high", "hike", "hill", "hint", "hold", "home",
    "hood", "hook", "hope", "horn", "host", "hour", "huge", "hung",
    "hunt", "hush", "icon", "idea", "inch", "into", "iron", "item",
    "jade", "jazz", "join", "joke", "jump", "june", "jury", "just",
    "keen", "keep", "kept", "kind", "king", "kite", "knee", "knew",
    "knob", "knot", "lace", "lake", "lamb", "lamp", "land", "lane",
];
