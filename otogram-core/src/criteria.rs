//! Age- and gender-normed hearing-loss criteria
//!
//! Global invariants enforced:
//! - The reference table is fixed at compile time and never mutated
//! - Lookup is exact-match on pre-tabulated integer ages (no interpolation)
//! - Every row satisfies mild < significant

use crate::measurement::Gender;

/// Youngest age with a tabulated criteria row
pub const MIN_TABULATED_AGE: u8 = 18;

/// Oldest age with a tabulated criteria row
pub const MAX_TABULATED_AGE: u8 = 65;

const TABULATED_AGES: usize = (MAX_TABULATED_AGE - MIN_TABULATED_AGE + 1) as usize;

/// Summed-decibel severity boundaries for one age/gender row
///
/// `mild` is the lowest threshold sum classified as mild hearing loss;
/// `significant` is the lowest sum classified as significant hearing loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub mild: i32,
    pub significant: i32,
}

/// One table row: [male, female] boundaries at a single age
const fn row(
    male_mild: i32,
    male_significant: i32,
    female_mild: i32,
    female_significant: i32,
) -> [Thresholds; 2] {
    [
        Thresholds {
            mild: male_mild,
            significant: male_significant,
        },
        Thresholds {
            mild: female_mild,
            significant: female_significant,
        },
    ]
}

/// Criteria rows indexed by age offset from MIN_TABULATED_AGE
///
/// Generated from the clinical reference data, one row per age.
static CRITERIA: [[Thresholds; 2]; TABULATED_AGES] = [
    row(51, 95, 46, 78),     // 18
    row(51, 95, 46, 78),     // 19
    row(51, 95, 46, 78),     // 20
    row(51, 95, 46, 78),     // 21
    row(54, 98, 48, 80),     // 22
    row(56, 101, 49, 82),    // 23
    row(59, 104, 50, 84),    // 24
    row(62, 107, 52, 87),    // 25
    row(64, 110, 54, 89),    // 26
    row(67, 113, 55, 91),    // 27
    row(70, 117, 57, 94),    // 28
    row(73, 121, 58, 97),    // 29
    row(76, 124, 60, 99),    // 30
    row(79, 128, 61, 102),   // 31
    row(82, 132, 63, 105),   // 32
    row(86, 136, 65, 108),   // 33
    row(89, 141, 66, 111),   // 34
    row(93, 145, 68, 113),   // 35
    row(96, 150, 69, 116),   // 36
    row(100, 154, 71, 119),  // 37
    row(104, 160, 73, 122),  // 38
    row(108, 166, 75, 125),  // 39
    row(113, 171, 76, 128),  // 40
    row(117, 177, 78, 131),  // 41
    row(121, 183, 80, 134),  // 42
    row(125, 189, 83, 138),  // 43
    row(129, 194, 85, 142),  // 44
    row(134, 200, 88, 145),  // 45
    row(138, 205, 90, 149),  // 46
    row(142, 211, 93, 153),  // 47
    row(147, 217, 97, 158),  // 48
    row(151, 223, 100, 162), // 49
    row(156, 228, 104, 167), // 50
    row(160, 234, 107, 171), // 51
    row(165, 240, 111, 176), // 52
    row(170, 246, 115, 182), // 53
    row(175, 252, 119, 187), // 54
    row(180, 257, 123, 193), // 55
    row(185, 263, 127, 198), // 56
    row(190, 269, 131, 204), // 57
    row(195, 274, 136, 210), // 58
    row(201, 280, 141, 216), // 59
    row(206, 285, 147, 223), // 60
    row(212, 291, 152, 229), // 61
    row(217, 296, 157, 235), // 62
    row(223, 301, 163, 242), // 63
    row(229, 306, 169, 248), // 64
    row(235, 311, 175, 255), // 65
];

/// Look up the severity boundaries for an age/gender pair
///
/// Returns `None` for ages outside the tabulated range. Every integer age in
/// [MIN_TABULATED_AGE, MAX_TABULATED_AGE] has its own row, so a `Some` result
/// is always an exact match.
pub fn thresholds(age: u8, gender: Gender) -> Option<Thresholds> {
    if !(MIN_TABULATED_AGE..=MAX_TABULATED_AGE).contains(&age) {
        return None;
    }
    let row = &CRITERIA[(age - MIN_TABULATED_AGE) as usize];
    Some(row[gender.table_index()])
}
