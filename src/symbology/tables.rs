//! Table-driven encoders for the linear symbologies `barcoders` lacks:
//! full-ASCII Code 39 and Code 93, and MSI (modified Plessey).

use crate::error::{Error, Result};

/// Code 93 basic characters, in check-value order.
const CODE93_CHARS: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. $/+%";

/// Code 93 patterns for the 43 basic characters followed by the shift
/// characters `($)`, `(%)`, `(/)` and `(+)`.
const CODE93_PATTERNS: [u16; 47] = [
    0b100010100, 0b101001000, 0b101000100, 0b101000010, 0b100101000, // 0-4
    0b100100100, 0b100100010, 0b101010000, 0b100010010, 0b100001010, // 5-9
    0b110101000, 0b110100100, 0b110100010, 0b110010100, 0b110010010, // A-E
    0b110001010, 0b101101000, 0b101100100, 0b101100010, 0b100110100, // F-J
    0b100011010, 0b101011000, 0b101001100, 0b101000110, 0b100101100, // K-O
    0b100010110, 0b110110100, 0b110110010, 0b110101100, 0b110100110, // P-T
    0b110010110, 0b110011010, 0b101101100, 0b101100110, 0b100110110, // U-Y
    0b100111010, 0b100101110, 0b111010100, 0b111010010, 0b111001010, // Z - . space $
    0b101101110, 0b101110110, 0b110101110, // / + %
    0b100100110, 0b111011010, 0b111010110, 0b100110010, // ($) (%) (/) (+)
];

/// Code 93 start/stop character.
const CODE93_GUARD: u16 = 0b101011110;

/// Map an ASCII character to its full-ASCII form: an optional shift
/// (`$`, `%`, `/` or `+`) followed by a basic Code 39/93 character.
fn full_ascii(c: char) -> Option<(Option<char>, char)> {
    let code = u32::from(c);
    let shifted = |shift: char, first: char, offset: u32| {
        char::from_u32(u32::from(first) + offset).map(|base| (Some(shift), base))
    };

    match c {
        '0'..='9' | 'A'..='Z' | ' ' | '-' | '.' => Some((None, c)),
        '\0' => Some((Some('%'), 'U')),
        '\u{01}'..='\u{1a}' => shifted('$', 'A', code - 0x01),
        '\u{1b}'..='\u{1f}' => shifted('%', 'A', code - 0x1b),
        '!'..=',' => shifted('/', 'A', code - 0x21),
        '/' => Some((Some('/'), 'O')),
        ':' => Some((Some('/'), 'Z')),
        ';'..='?' => shifted('%', 'F', code - 0x3b),
        '@' => Some((Some('%'), 'V')),
        '['..='_' => shifted('%', 'K', code - 0x5b),
        '`' => Some((Some('%'), 'W')),
        'a'..='z' => shifted('+', 'A', code - 0x61),
        '{'..='\u{7f}' => shifted('%', 'P', code - 0x7b),
        _ => None,
    }
}

fn unsupported(symbology: &str, c: char) -> Error {
    Error::Barcode(format!("{} cannot encode {:?}", symbology, c))
}

/// Rewrite `value` in the Code 39 alphabet using full-ASCII shift pairs.
pub(super) fn extended39(value: &str) -> Result<String> {
    let mut data = String::with_capacity(value.len() * 2);
    for c in value.chars() {
        let (shift, base) = full_ascii(c).ok_or_else(|| unsupported("Extended39", c))?;
        if let Some(shift) = shift {
            data.push(shift);
        }
        data.push(base);
    }
    Ok(data)
}

/// Encode `value` as full-ASCII Code 93 with both check characters.
pub(super) fn extended93(value: &str) -> Result<Vec<u8>> {
    if value.is_empty() {
        return Err(Error::Barcode("Extended93 requires at least one character".to_string()));
    }

    let mut symbols = Vec::with_capacity(value.len() * 2 + 2);
    for c in value.chars() {
        let (shift, base) = full_ascii(c).ok_or_else(|| unsupported("Extended93", c))?;
        if let Some(shift) = shift {
            symbols.push(match shift {
                '$' => 43,
                '%' => 44,
                '/' => 45,
                _ => 46,
            });
        }
        symbols.push(CODE93_CHARS.find(base).ok_or_else(|| unsupported("Extended93", c))?);
    }
    let c_check = code93_check(&symbols, 20);
    symbols.push(c_check);
    let k_check = code93_check(&symbols, 15);
    symbols.push(k_check);

    let mut modules = Vec::with_capacity((symbols.len() + 2) * 9 + 1);
    push_bits(&mut modules, CODE93_GUARD, 9);
    for &symbol in &symbols {
        push_bits(&mut modules, CODE93_PATTERNS[symbol], 9);
    }
    push_bits(&mut modules, CODE93_GUARD, 9);
    // termination bar
    modules.push(1);
    Ok(modules)
}

/// Weighted modulo-47 check; weights run 1..=`max_weight` from the right.
fn code93_check(symbols: &[usize], max_weight: usize) -> usize {
    symbols
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &symbol)| (i % max_weight + 1) * symbol)
        .sum::<usize>()
        % 47
}

/// Encode `value` as MSI with a modulo-10 check digit.
pub(super) fn msi(value: &str) -> Result<Vec<u8>> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::Barcode(format!("MSI requires digits, got '{}'", value)));
    }

    let mut digits: Vec<u8> = value.bytes().map(|b| b - b'0').collect();
    digits.push(mod10_check(&digits));

    let mut modules = vec![1, 1, 0];
    for digit in digits {
        for bit in (0..4).rev() {
            if (digit >> bit) & 1 == 1 {
                modules.extend_from_slice(&[1, 1, 0]);
            } else {
                modules.extend_from_slice(&[1, 0, 0]);
            }
        }
    }
    modules.extend_from_slice(&[1, 0, 0, 1]);
    Ok(modules)
}

/// Luhn-style check digit, doubling from the rightmost digit.
fn mod10_check(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            let d = u32::from(d);
            if i % 2 == 0 {
                let doubled = d * 2;
                doubled / 10 + doubled % 10
            } else {
                d
            }
        })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

fn push_bits(modules: &mut Vec<u8>, pattern: u16, width: u32) {
    for bit in (0..width).rev() {
        modules.push(((pattern >> bit) & 1) as u8);
    }
}
