use crate::rng::Lcg;

/// Rain alphabet: binary digits, Cyrillic capitals А-Я and a run of Katakana.
pub const GLYPHS: &[char] = &[
    // Digits
    '0', '1',
    // Cyrillic
    'А', 'Б', 'В', 'Г', 'Д', 'Е', 'Ж', 'З', 'И', 'Й', 'К', 'Л', 'М', 'Н', 'О', 'П',
    'Р', 'С', 'Т', 'У', 'Ф', 'Х', 'Ц', 'Ч', 'Ш', 'Щ', 'Ъ', 'Ы', 'Ь', 'Э', 'Ю', 'Я',
    // Katakana
    'ア', 'イ', 'ウ', 'エ', 'オ', 'カ', 'キ', 'ク', 'ケ', 'コ', 'サ', 'シ', 'ス', 'セ', 'ソ', 'タ',
    'チ', 'ッ', 'テ', 'ト', 'ナ', 'ニ', 'ヌ', 'ネ', 'ノ', 'ハ', 'ヒ', 'フ', 'ヘ', 'ホ', 'マ', 'ミ',
    'ム', 'メ', 'モ', 'ヤ', 'ユ', 'ヨ', 'ラ', 'リ', 'ル', 'レ', 'ロ', 'ワ', 'ヲ', 'ン',
];

pub fn glyph_count() -> usize {
    GLYPHS.len()
}

pub fn glyph_at(index: usize) -> char {
    GLYPHS[index % GLYPHS.len()]
}

pub fn pick_random_glyph(rng: &mut Lcg) -> char {
    glyph_at(rng.range_usize(0, glyph_count()))
}
