//! Job identity resolution.
//!
//! Raw job strings arrive in whatever shape the host feels like sending
//! ("Garbage Collector!", "garbageCollector", ...). Resolution is purely
//! syntactic: clean the spelling, then apply the alias table. Whether a
//! descriptor actually exists for the result is the caller's problem.

use super::registry::alias_for;

/// Lowercase and strip everything that is not a lowercase letter or digit.
pub fn clean_job_key(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Resolve a raw job string to its canonical key. Aliases are defined over
/// cleaned spellings; unknown spellings resolve to the cleaned string itself.
pub fn resolve_job_key(raw: &str) -> String {
    let cleaned = clean_job_key(raw);
    match alias_for(&cleaned) {
        Some(canonical) => canonical.to_string(),
        None => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleaning_strips_case_and_punctuation() {
        assert_eq!(clean_job_key("Garbage Collector!"), "garbagecollector");
        assert_eq!(clean_job_key("POST-OP Driver"), "postopdriver");
        assert_eq!(clean_job_key("trucker"), "trucker");
        assert_eq!(clean_job_key("  EMS / Paramedic  "), "emsparamedic");
    }

    #[test]
    fn spellings_differing_only_in_noise_resolve_identically() {
        assert_eq!(resolve_job_key("Garbage Collector!"), resolve_job_key("garbagecollector"));
        assert_eq!(resolve_job_key("Garbage Collector!"), "garbage");
    }

    #[test]
    fn aliases_apply_after_cleaning() {
        assert_eq!(resolve_job_key("Airline Pilot"), "pilot");
        assert_eq!(resolve_job_key("Wildlife Hunter"), "hunter");
        assert_eq!(resolve_job_key("RTS Transporter"), "business");
        assert_eq!(resolve_job_key("Train Conductor"), "conductor");
    }

    #[test]
    fn unknown_spellings_pass_through_cleaned() {
        assert_eq!(resolve_job_key("Space Pirate"), "spacepirate");
        assert_eq!(resolve_job_key(""), "");
    }
}
