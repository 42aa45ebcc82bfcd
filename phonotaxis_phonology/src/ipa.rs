// IPA rendering and parsing.
//
// The engine never turns phonemes into text itself; it calls a
// `PhonemeRenderer`. `IpaRenderer` is the default implementation: a static
// symbol table plus diacritics.
//
// Rendering is nearest-match. Within the family selected by manner and
// airstream, each table entry is scored against the phoneme (place 4 for
// exact or 2 for a neighbouring place, sibilance 3, laterality 2, voicing 1)
// and the first best entry wins. Remaining differences become diacritics:
// dental, voicing, coarticulation, aspiration, length, ejective. Affricates
// are a stop and a fricative joined by a tie bar. A consonant with no manner
// renders as `C`, a vowel with no table entry as `V`, a boundary as "".
//
// Parsing is the inverse: one base symbol from the table, then diacritics.
// A fricative after a stop (with or without the tie bar) makes an affricate
// that takes place, laterality and sibilance from the fricative. Parsed
// phonemes have every feature specified.
//
// See also: `phoneme.rs` for the match predicate the parsed phonemes feed.

use crate::consonant::{
    Airstream, Aspiration, Coarticulation, Consonant, Gemination, Laterality, Manner, Place,
    Sibilance, Voicing,
};
use crate::phoneme::Phoneme;
use crate::vowel::{Frontness, Height, Length, Nasality, Phonation, Rounding, Vowel};
use std::cmp::Reverse;
use std::fmt;
use thiserror::Error;

/// Turns a phoneme into display text.
pub trait PhonemeRenderer {
    fn render(&self, phoneme: &Phoneme) -> String;
}

impl<P: PhonemeRenderer + ?Sized> PhonemeRenderer for &P {
    fn render(&self, phoneme: &Phoneme) -> String {
        (**self).render(phoneme)
    }
}

/// Renders phonemes as IPA text.
#[derive(Clone, Copy, Debug, Default)]
pub struct IpaRenderer;

impl PhonemeRenderer for IpaRenderer {
    fn render(&self, phoneme: &Phoneme) -> String {
        match phoneme {
            Phoneme::Consonant(c) => render_consonant(c),
            Phoneme::Vowel(v) => render_vowel(v),
            Phoneme::WordBoundary { .. } => String::new(),
        }
    }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&IpaRenderer.render(self))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IpaError {
    #[error("empty IPA symbol")]
    Empty,
    #[error("unknown IPA symbol {0:?}")]
    UnknownSymbol(String),
    #[error("unknown diacritic {diacritic:?} in IPA symbol {symbol:?}")]
    UnknownDiacritic { symbol: String, diacritic: char },
}

// ---------------------------------------------------------------------------
// Diacritics
// ---------------------------------------------------------------------------

const TIE_BAR: char = '\u{361}';
const DENTAL: char = '\u{32A}';
const VOICELESS: char = '\u{325}';
const VOICED: char = '\u{32C}';
const NASALIZED: char = '\u{303}';
const CREAKY: char = '\u{330}';
const BREATHY: char = '\u{324}';
const EXTRA_SHORT: char = '\u{306}';
const SYLLABIC: char = '\u{329}';
const LONG: char = 'ː';
const ASPIRATED: char = 'ʰ';
const EJECTIVE: char = 'ʼ';
const LABIALIZED: char = 'ʷ';
const PALATALIZED: char = 'ʲ';
const VELARIZED: char = 'ˠ';
const PHARYNGEALIZED: char = 'ˤ';
const PRENASAL: char = 'ⁿ';

// ---------------------------------------------------------------------------
// Consonant table
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug)]
struct ConsonantSymbol {
    symbol: char,
    manner: Manner,
    place: Place,
    voicing: Voicing,
    laterality: Laterality,
    sibilance: Sibilance,
    airstream: Airstream,
}

impl ConsonantSymbol {
    const fn new(symbol: char, manner: Manner, place: Place, voiced: bool) -> Self {
        Self {
            symbol,
            manner,
            place,
            voicing: if voiced {
                Voicing::Voiced
            } else {
                Voicing::Unvoiced
            },
            laterality: Laterality::Central,
            sibilance: Sibilance::Nonsibilant,
            airstream: Airstream::Pulmonic,
        }
    }

    const fn lateral(mut self) -> Self {
        self.laterality = Laterality::Lateral;
        self
    }

    const fn sibilant(mut self) -> Self {
        self.sibilance = Sibilance::Sibilant;
        self
    }

    const fn airstream(mut self, airstream: Airstream) -> Self {
        self.airstream = airstream;
        self
    }

    fn to_consonant(self) -> Consonant {
        Consonant {
            place: self.place,
            manner: self.manner,
            coarticulation: Coarticulation::None,
            airstream: self.airstream,
            voicing: self.voicing,
            aspiration: Aspiration::Unaspirated,
            laterality: self.laterality,
            sibilance: self.sibilance,
            gemination: Gemination::Singleton,
        }
    }
}

const fn nasal(symbol: char, place: Place) -> ConsonantSymbol {
    ConsonantSymbol::new(symbol, Manner::Nasal, place, true)
}

const fn stop(symbol: char, place: Place, voiced: bool) -> ConsonantSymbol {
    ConsonantSymbol::new(symbol, Manner::Stop, place, voiced)
}

const fn fricative(symbol: char, place: Place, voiced: bool) -> ConsonantSymbol {
    ConsonantSymbol::new(symbol, Manner::Fricative, place, voiced)
}

const fn approximant(symbol: char, place: Place, voiced: bool) -> ConsonantSymbol {
    ConsonantSymbol::new(symbol, Manner::Approximant, place, voiced)
}

const fn implosive(symbol: char, place: Place) -> ConsonantSymbol {
    ConsonantSymbol::new(symbol, Manner::Stop, place, true).airstream(Airstream::Implosive)
}

const fn click(symbol: char, place: Place) -> ConsonantSymbol {
    ConsonantSymbol::new(symbol, Manner::Click, place, false).airstream(Airstream::Click)
}

#[rustfmt::skip]
const CONSONANTS: &[ConsonantSymbol] = &[
    nasal('m', Place::Bilabial),
    nasal('ɱ', Place::LabioDental),
    nasal('n', Place::Alveolar),
    nasal('ɳ', Place::Retroflex),
    nasal('ɲ', Place::Palatal),
    nasal('ŋ', Place::Velar),
    nasal('ɴ', Place::Uvular),

    stop('p', Place::Bilabial, false),
    stop('b', Place::Bilabial, true),
    stop('t', Place::Alveolar, false),
    stop('d', Place::Alveolar, true),
    stop('ʈ', Place::Retroflex, false),
    stop('ɖ', Place::Retroflex, true),
    stop('c', Place::Palatal, false),
    stop('ɟ', Place::Palatal, true),
    stop('k', Place::Velar, false),
    stop('g', Place::Velar, true),
    stop('q', Place::Uvular, false),
    stop('ɢ', Place::Uvular, true),
    stop('ʡ', Place::Pharyngeal, false),
    stop('ʔ', Place::Glottal, false),

    fricative('ɸ', Place::Bilabial, false),
    fricative('β', Place::Bilabial, true),
    fricative('f', Place::LabioDental, false),
    fricative('v', Place::LabioDental, true),
    fricative('θ', Place::Dental, false),
    fricative('ð', Place::Dental, true),
    fricative('s', Place::Alveolar, false).sibilant(),
    fricative('z', Place::Alveolar, true).sibilant(),
    fricative('ɬ', Place::Alveolar, false).lateral(),
    fricative('ɮ', Place::Alveolar, true).lateral(),
    fricative('ʃ', Place::PostAlveolar, false).sibilant(),
    fricative('ʒ', Place::PostAlveolar, true).sibilant(),
    fricative('ʂ', Place::Retroflex, false).sibilant(),
    fricative('ʐ', Place::Retroflex, true).sibilant(),
    fricative('ɕ', Place::Palatal, false).sibilant(),
    fricative('ʑ', Place::Palatal, true).sibilant(),
    fricative('ç', Place::Palatal, false),
    fricative('ʝ', Place::Palatal, true),
    fricative('x', Place::Velar, false),
    fricative('ɣ', Place::Velar, true),
    fricative('χ', Place::Uvular, false),
    fricative('ʁ', Place::Uvular, true),
    fricative('ħ', Place::Pharyngeal, false),
    fricative('ʕ', Place::Pharyngeal, true),
    fricative('h', Place::Glottal, false),
    fricative('ɦ', Place::Glottal, true),

    approximant('w', Place::Bilabial, true),
    approximant('ʍ', Place::Bilabial, false),
    approximant('ʋ', Place::LabioDental, true),
    approximant('ɹ', Place::Alveolar, true),
    approximant('l', Place::Alveolar, true).lateral(),
    approximant('ɻ', Place::Retroflex, true),
    approximant('ɭ', Place::Retroflex, true).lateral(),
    approximant('j', Place::Palatal, true),
    approximant('ʎ', Place::Palatal, true).lateral(),
    approximant('ɰ', Place::Velar, true),
    approximant('ʟ', Place::Velar, true).lateral(),

    ConsonantSymbol::new('ⱱ', Manner::Tap, Place::LabioDental, true),
    ConsonantSymbol::new('ɾ', Manner::Tap, Place::Alveolar, true),
    ConsonantSymbol::new('ɺ', Manner::Tap, Place::Alveolar, true).lateral(),
    ConsonantSymbol::new('ɽ', Manner::Tap, Place::Retroflex, true),

    ConsonantSymbol::new('ʙ', Manner::Trill, Place::Bilabial, true),
    ConsonantSymbol::new('r', Manner::Trill, Place::Alveolar, true),
    ConsonantSymbol::new('ʀ', Manner::Trill, Place::Uvular, true),

    implosive('ɓ', Place::Bilabial),
    implosive('ɗ', Place::Alveolar),
    implosive('ᶑ', Place::Retroflex),
    implosive('ʄ', Place::Palatal),
    implosive('ɠ', Place::Velar),
    implosive('ʛ', Place::Uvular),

    click('ʘ', Place::Bilabial),
    click('ǀ', Place::Dental),
    click('ǃ', Place::Alveolar),
    click('ǁ', Place::Alveolar).lateral(),
    click('‼', Place::Retroflex),
    click('ǂ', Place::Palatal),
];

/// Places close enough that one can stand in for the other.
const NEIGHBOUR_PLACES: [(Place, Place); 5] = [
    (Place::Dental, Place::Alveolar),
    (Place::Alveolar, Place::PostAlveolar),
    (Place::Bilabial, Place::LabioDental),
    (Place::Velar, Place::Uvular),
    (Place::Pharyngeal, Place::Glottal),
];

fn consonant_entry(symbol: char) -> Option<&'static ConsonantSymbol> {
    let symbol = match symbol {
        'ɡ' => 'g',
        '!' => 'ǃ',
        other => other,
    };
    CONSONANTS.iter().find(|e| e.symbol == symbol)
}

fn place_score(wanted: Place, entry: Place) -> u32 {
    if wanted == entry {
        4
    } else if NEIGHBOUR_PLACES
        .iter()
        .any(|&(a, b)| (a, b) == (wanted, entry) || (b, a) == (wanted, entry))
    {
        2
    } else {
        0
    }
}

/// The closest table symbol for `c` among entries of the given manner and
/// airstream, followed by dental and voicing diacritics.
fn base_symbol(c: &Consonant, manner: Manner, airstream: Airstream) -> Option<String> {
    let voicing = if c.is_voiced() {
        Voicing::Voiced
    } else {
        Voicing::Unvoiced
    };
    let entry = CONSONANTS
        .iter()
        .filter(|e| e.manner == manner && e.airstream == airstream)
        .min_by_key(|e| {
            let mut score = place_score(c.place, e.place);
            if e.sibilance == c.sibilance {
                score += 3;
            }
            if e.laterality == c.laterality {
                score += 2;
            }
            if e.voicing == voicing {
                score += 1;
            }
            Reverse(score)
        })?;

    let mut out = String::new();
    out.push(entry.symbol);
    if c.place == Place::Dental && entry.place == Place::Alveolar {
        out.push(DENTAL);
    }
    if c.voicing != Voicing::Unspecified && entry.voicing != voicing {
        out.push(if voicing == Voicing::Voiced {
            VOICED
        } else {
            VOICELESS
        });
    }
    Some(out)
}

fn render_consonant(c: &Consonant) -> String {
    let airstream = match (c.manner, c.airstream) {
        (Manner::Click, _) | (_, Airstream::Click) => Airstream::Click,
        (_, Airstream::Implosive) => Airstream::Implosive,
        _ => Airstream::Pulmonic,
    };
    let base = match (c.manner, airstream) {
        (_, Airstream::Click) => base_symbol(c, Manner::Click, airstream),
        (Manner::Affricate, Airstream::Pulmonic) => {
            let closure = Consonant {
                laterality: Laterality::Central,
                sibilance: Sibilance::Nonsibilant,
                ..*c
            };
            base_symbol(&closure, Manner::Stop, airstream)
                .zip(base_symbol(c, Manner::Fricative, airstream))
                .map(|(stop, release)| format!("{stop}{TIE_BAR}{release}"))
        }
        (Manner::Affricate, _) => base_symbol(c, Manner::Stop, airstream),
        (manner, _) => base_symbol(c, manner, airstream),
    };
    let Some(base) = base else {
        return "C".to_string();
    };

    let mut out = String::new();
    if c.coarticulation == Coarticulation::Prenasalized {
        out.push(PRENASAL);
    }
    out.push_str(&base);
    match c.coarticulation {
        Coarticulation::Labialized => out.push(LABIALIZED),
        Coarticulation::Palatalized => out.push(PALATALIZED),
        Coarticulation::Velarized => out.push(VELARIZED),
        Coarticulation::Pharyngealized => out.push(PHARYNGEALIZED),
        Coarticulation::Unspecified | Coarticulation::None | Coarticulation::Prenasalized => {}
    }
    if c.aspiration == Aspiration::Aspirated {
        out.push(ASPIRATED);
    }
    if c.gemination == Gemination::Geminate {
        out.push(LONG);
    }
    if c.airstream == Airstream::Ejective {
        out.push(EJECTIVE);
    }
    out
}

// ---------------------------------------------------------------------------
// Vowel table
// ---------------------------------------------------------------------------

#[rustfmt::skip]
const VOWELS: &[(char, Height, Frontness, Rounding)] = &[
    ('i', Height::Close, Frontness::Front, Rounding::Unrounded),
    ('y', Height::Close, Frontness::Front, Rounding::Rounded),
    ('ɨ', Height::Close, Frontness::Central, Rounding::Unrounded),
    ('ʉ', Height::Close, Frontness::Central, Rounding::Rounded),
    ('ɯ', Height::Close, Frontness::Back, Rounding::Unrounded),
    ('u', Height::Close, Frontness::Back, Rounding::Rounded),
    ('ɪ', Height::NearClose, Frontness::Front, Rounding::Unrounded),
    ('ʏ', Height::NearClose, Frontness::Front, Rounding::Rounded),
    ('ʊ', Height::NearClose, Frontness::Back, Rounding::Rounded),
    ('e', Height::CloseMid, Frontness::Front, Rounding::Unrounded),
    ('ø', Height::CloseMid, Frontness::Front, Rounding::Rounded),
    ('ɘ', Height::CloseMid, Frontness::Central, Rounding::Unrounded),
    ('ɵ', Height::CloseMid, Frontness::Central, Rounding::Rounded),
    ('ɤ', Height::CloseMid, Frontness::Back, Rounding::Unrounded),
    ('o', Height::CloseMid, Frontness::Back, Rounding::Rounded),
    ('ə', Height::Mid, Frontness::Central, Rounding::Unrounded),
    ('ɛ', Height::OpenMid, Frontness::Front, Rounding::Unrounded),
    ('œ', Height::OpenMid, Frontness::Front, Rounding::Rounded),
    ('ɜ', Height::OpenMid, Frontness::Central, Rounding::Unrounded),
    ('ɞ', Height::OpenMid, Frontness::Central, Rounding::Rounded),
    ('ʌ', Height::OpenMid, Frontness::Back, Rounding::Unrounded),
    ('ɔ', Height::OpenMid, Frontness::Back, Rounding::Rounded),
    ('æ', Height::NearOpen, Frontness::Front, Rounding::Unrounded),
    ('ɐ', Height::NearOpen, Frontness::Central, Rounding::Unrounded),
    ('a', Height::Open, Frontness::Front, Rounding::Unrounded),
    ('ɶ', Height::Open, Frontness::Front, Rounding::Rounded),
    ('ɑ', Height::Open, Frontness::Back, Rounding::Unrounded),
    ('ɒ', Height::Open, Frontness::Back, Rounding::Rounded),
];

fn vowel_entry(symbol: char) -> Option<&'static (char, Height, Frontness, Rounding)> {
    VOWELS.iter().find(|e| e.0 == symbol)
}

fn vowel_symbol(height: Height, frontness: Frontness, rounding: Rounding) -> Option<char> {
    VOWELS
        .iter()
        .find(|&&(_, h, f, r)| (h, f, r) == (height, frontness, rounding))
        .map(|e| e.0)
}

fn render_vowel(v: &Vowel) -> String {
    // Heights with gaps in the table borrow a neighbour's symbol.
    let fallback = match v.height {
        Height::Mid => Height::CloseMid,
        Height::NearClose => Height::Close,
        Height::NearOpen => Height::Open,
        Height::Open => Height::NearOpen,
        other => other,
    };
    let symbol = vowel_symbol(v.height, v.frontness, v.rounding)
        .or_else(|| vowel_symbol(fallback, v.frontness, v.rounding));
    let Some(symbol) = symbol else {
        return "V".to_string();
    };

    let mut out = String::new();
    out.push(symbol);
    match v.phonation {
        Phonation::Devoiced => out.push(VOICELESS),
        Phonation::Creaky => out.push(CREAKY),
        Phonation::Breathy => out.push(BREATHY),
        Phonation::Unspecified | Phonation::Modal => {}
    }
    if v.nasality == Nasality::Nasal {
        out.push(NASALIZED);
    }
    match v.length {
        Length::Long => out.push(LONG),
        Length::ExtraLong => out.push_str("ːː"),
        Length::ExtraShort => out.push(EXTRA_SHORT),
        Length::Unspecified | Length::Short => {}
    }
    out
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn unknown_diacritic(symbol: &str, diacritic: char) -> IpaError {
    IpaError::UnknownDiacritic {
        symbol: symbol.to_string(),
        diacritic,
    }
}

impl Consonant {
    /// Parse one IPA consonant, e.g. `"t"`, `"kʷʰ"`, `"t͡ʃ"`, `"ⁿd"`.
    pub fn from_ipa(symbol: &str) -> Result<Self, IpaError> {
        let symbol = symbol.trim();
        let mut chars = symbol.chars().peekable();
        let prenasalized = chars.next_if_eq(&PRENASAL).is_some();
        let base = chars.next().ok_or(IpaError::Empty)?;
        let mut c = consonant_entry(base)
            .ok_or_else(|| IpaError::UnknownSymbol(symbol.to_string()))?
            .to_consonant();
        if prenasalized {
            c.coarticulation = Coarticulation::Prenasalized;
        }

        while let Some(mark) = chars.next() {
            match mark {
                LONG => c.gemination = Gemination::Geminate,
                ASPIRATED => c.aspiration = Aspiration::Aspirated,
                LABIALIZED => c.coarticulation = Coarticulation::Labialized,
                PALATALIZED => c.coarticulation = Coarticulation::Palatalized,
                VELARIZED => c.coarticulation = Coarticulation::Velarized,
                PHARYNGEALIZED => c.coarticulation = Coarticulation::Pharyngealized,
                EJECTIVE => c.airstream = Airstream::Ejective,
                DENTAL => c.place = Place::Dental,
                VOICELESS => c.voicing = Voicing::Unvoiced,
                VOICED => c.voicing = Voicing::Voiced,
                SYLLABIC => {}
                TIE_BAR => {
                    let release = chars
                        .next()
                        .ok_or_else(|| unknown_diacritic(symbol, TIE_BAR))?;
                    if !c.release_into(release) {
                        return Err(unknown_diacritic(symbol, release));
                    }
                }
                other => {
                    if !c.release_into(other) {
                        return Err(unknown_diacritic(symbol, other));
                    }
                }
            }
        }
        Ok(c)
    }

    /// Turn a pulmonic stop into an affricate with the given fricative
    /// release. False if either half does not qualify.
    fn release_into(&mut self, release: char) -> bool {
        let Some(fricative) = consonant_entry(release) else {
            return false;
        };
        if self.manner != Manner::Stop
            || self.airstream != Airstream::Pulmonic
            || fricative.manner != Manner::Fricative
        {
            return false;
        }
        self.manner = Manner::Affricate;
        self.place = fricative.place;
        self.laterality = fricative.laterality;
        self.sibilance = fricative.sibilance;
        true
    }
}

impl Vowel {
    /// Parse one IPA vowel, e.g. `"a"`, `"ẽ"`, `"uː"`.
    pub fn from_ipa(symbol: &str) -> Result<Self, IpaError> {
        let symbol = symbol.trim();
        let mut chars = symbol.chars();
        let base = chars.next().ok_or(IpaError::Empty)?;
        let &(_, height, frontness, rounding) =
            vowel_entry(base).ok_or_else(|| IpaError::UnknownSymbol(symbol.to_string()))?;
        let mut v = Vowel {
            height,
            frontness,
            phonation: Phonation::Modal,
            rounding,
            nasality: Nasality::Oral,
            length: Length::Short,
        };

        for mark in chars {
            match mark {
                VOICELESS => v.phonation = Phonation::Devoiced,
                CREAKY => v.phonation = Phonation::Creaky,
                BREATHY => v.phonation = Phonation::Breathy,
                NASALIZED => v.nasality = Nasality::Nasal,
                EXTRA_SHORT => v.length = Length::ExtraShort,
                LONG if v.length == Length::Long => v.length = Length::ExtraLong,
                LONG => v.length = Length::Long,
                SYLLABIC => {}
                other => return Err(unknown_diacritic(symbol, other)),
            }
        }
        Ok(v)
    }
}

impl Phoneme {
    /// Parse one IPA consonant or vowel.
    pub fn from_ipa(symbol: &str) -> Result<Self, IpaError> {
        let trimmed = symbol.trim();
        let first = trimmed.chars().next().ok_or(IpaError::Empty)?;
        if first == PRENASAL || consonant_entry(first).is_some() {
            Consonant::from_ipa(trimmed).map(Phoneme::Consonant)
        } else if vowel_entry(first).is_some() {
            Vowel::from_ipa(trimmed).map(Phoneme::Vowel)
        } else {
            Err(IpaError::UnknownSymbol(trimmed.to_string()))
        }
    }
}
