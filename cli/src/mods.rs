use anyhow::{bail, Context, Result};
use mania_pp::Mods;

const ACRONYMS: &[(&str, u32)] = &[
    ("NM", 0),
    ("NF", <u32 as Mods>::NF),
    ("EZ", <u32 as Mods>::EZ),
    ("TD", 4),
    ("HD", 8),
    ("HR", <u32 as Mods>::HR),
    ("SD", 32),
    ("DT", <u32 as Mods>::DT),
    ("RX", 128),
    ("HT", <u32 as Mods>::HT),
    ("NC", <u32 as Mods>::NC),
    ("FL", 1024),
    ("SO", 4096),
    ("PF", 32 + 16384),
    ("FI", 1_048_576),
    ("MR", 1_073_741_824),
];

/// Parse mods either as their bit value, e.g. `66`, or as
/// concatenated acronyms, e.g. `EZDT` or `+ez,dt`.
pub fn parse_mods(input: &str) -> Result<u32> {
    let input = input.trim().trim_start_matches('+');

    if input.is_empty() {
        return Ok(0);
    }

    if input.bytes().all(|byte| byte.is_ascii_digit()) {
        return input
            .parse()
            .with_context(|| format!("mod bits `{input}` are out of range"));
    }

    let acronyms: String = input
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '|'))
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if acronyms.len() % 2 != 0 || !acronyms.is_ascii() {
        bail!("invalid mods `{input}`");
    }

    let mut mods = 0;

    for i in (0..acronyms.len()).step_by(2) {
        let acronym = &acronyms[i..i + 2];

        let Some((_, bits)) = ACRONYMS.iter().find(|(name, _)| *name == acronym) else {
            bail!("unknown mod `{acronym}`");
        };

        mods |= bits;
    }

    Ok(mods)
}
