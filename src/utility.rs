use anyhow::{bail, Result};

pub fn parse_number(s: &str) -> Result<usize> {
    if s.is_empty() {
        bail!("Failed to parse {:?}", s);
    }

    let mut ret: usize = 0;
    for c in s.chars() {
        let d = match c {
            '0'..='9' => (c as usize) - ('0' as usize),
            _ => bail!("Failed to parse {:?}", s),
        };

        ret = match ret.checked_mul(10).and_then(|r: usize| r.checked_add(d)) {
            Some(r) => r,
            None => bail!("Number is too large: {:?}", s),
        };
    }
    Ok(ret)
}

pub fn has_alphanumeric(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_alphanumeric())
}

// at least one letter and no lowercase letter
pub fn is_all_caps(s: &str) -> bool {
    let mut has_alphabetic = false;
    for c in s.chars() {
        if c.is_ascii_alphabetic() {
            has_alphabetic = true;
            if c.is_ascii_lowercase() {
                return false;
            }
        }
    }
    has_alphabetic
}
