//! Static registry of trackable jobs.
//!
//! Each job maps a canonical key to the remote field name its XP arrives
//! under, plus a display label. The alias table covers legacy and noisy
//! spellings that the host has been observed to send.

/// One statically registered job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobDescriptor {
    /// Canonical key used everywhere inside the tracker.
    pub canonical: &'static str,
    /// Field name the XP value arrives under in a snapshot.
    pub remote_key: &'static str,
    /// Human-facing label for the overlay.
    pub label: &'static str,
}

const JOBS: &[JobDescriptor] = &[
    JobDescriptor { canonical: "trucker", remote_key: "exp_trucking_trucking", label: "Trucking EXP" },
    JobDescriptor { canonical: "mechanic", remote_key: "exp_trucking_mechanic", label: "Mechanic EXP" },
    JobDescriptor { canonical: "garbage", remote_key: "exp_trucking_garbage", label: "Garbage EXP" },
    JobDescriptor { canonical: "postop", remote_key: "exp_trucking_postop", label: "PostOP EXP" },
    JobDescriptor { canonical: "pilot", remote_key: "exp_piloting_piloting", label: "Airline EXP" },
    JobDescriptor { canonical: "helicopterpilot", remote_key: "exp_piloting_heli", label: "Helicopter EXP" },
    JobDescriptor { canonical: "cargopilot", remote_key: "exp_piloting_cargos", label: "Cargo EXP" },
    JobDescriptor { canonical: "busdriver", remote_key: "exp_train_bus", label: "Bus EXP" },
    JobDescriptor { canonical: "conductor", remote_key: "exp_train_train", label: "Train EXP" },
    JobDescriptor { canonical: "emergency", remote_key: "exp_ems_ems", label: "EMS EXP" },
    JobDescriptor { canonical: "firefighter", remote_key: "exp_ems_fire", label: "Firefighting EXP" },
    JobDescriptor { canonical: "racer", remote_key: "exp_player_racing", label: "Racing EXP" },
    JobDescriptor { canonical: "farmer", remote_key: "exp_farming_farming", label: "Farming EXP" },
    JobDescriptor { canonical: "fisher", remote_key: "exp_farming_fishing", label: "Fishing EXP" },
    JobDescriptor { canonical: "miner", remote_key: "exp_farming_mining", label: "Mining EXP" },
    JobDescriptor { canonical: "business", remote_key: "exp_business_business", label: "Business EXP" },
    JobDescriptor { canonical: "hunter", remote_key: "exp_hunting_skill", label: "Hunting EXP" },
];

/// Aliases from cleaned (lowercased, alphanumeric-only) spellings to
/// canonical keys. Lookups happen after cleaning, so entries here are
/// already in cleaned form.
const ALIASES: &[(&str, &str)] = &[
    ("trucker", "trucker"),
    ("mechanic", "mechanic"),
    ("garbagecollector", "garbage"),
    ("postopdriver", "postop"),
    ("airlinepilot", "pilot"),
    ("helicopterpilot", "helicopterpilot"),
    ("cargopilot", "cargopilot"),
    ("busdriver", "busdriver"),
    ("trainconductor", "conductor"),
    ("emsparamedic", "emergency"),
    ("aerialfirefighter", "firefighter"),
    ("firefighter", "firefighter"),
    ("businesses", "citizen"),
    ("streetracer", "racer"),
    ("farmer", "farmer"),
    ("fisherman", "fisher"),
    ("miner", "miner"),
    ("wildlifehunter", "hunter"),
    ("postopemployee", "postop"),
    ("rtsaviator", "business"),
    ("rtsprofessional", "business"),
    ("rtstransporter", "business"),
    ("collinscocabbies", "business"),
];

/// Auxiliary keys requested alongside job fields in every data request.
const AUX_KEYS: &[&str] = &["inventory", "job_name", "job", "name"];

pub fn all_jobs() -> &'static [JobDescriptor] {
    JOBS
}

/// Look up the descriptor for a canonical key, if one is registered.
pub fn descriptor_for(canonical: &str) -> Option<&'static JobDescriptor> {
    JOBS.iter().find(|job| job.canonical == canonical)
}

pub fn alias_for(cleaned: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(from, _)| *from == cleaned)
        .map(|(_, to)| *to)
}

/// Derive the inventory token identifier that holds a job's bonus XP.
///
/// `exp_trucking_trucking` becomes `exp_token_a|trucking|trucking`.
pub fn bonus_token_id(remote_key: &str) -> String {
    let body = remote_key.strip_prefix("exp_").unwrap_or(remote_key);
    format!("exp_token_a|{}", body.replace('_', "|"))
}

/// The full key set for an untargeted data request: every job's remote key,
/// every derived bonus token key, then the auxiliary keys.
pub fn all_required_keys() -> Vec<String> {
    let mut keys: Vec<String> = JOBS.iter().map(|job| job.remote_key.to_string()).collect();
    keys.extend(JOBS.iter().map(|job| bonus_token_id(job.remote_key)));
    keys.extend(AUX_KEYS.iter().map(|key| key.to_string()));
    keys
}

/// A narrowed key set once the current job is known: that job's remote key,
/// its bonus token key, and the auxiliary keys. Unknown jobs fall back to
/// the full set.
pub fn optimized_keys_for(canonical: &str) -> Vec<String> {
    let Some(job) = descriptor_for(canonical) else {
        return all_required_keys();
    };

    let mut keys = vec![job.remote_key.to_string(), bonus_token_id(job.remote_key)];
    keys.extend(AUX_KEYS.iter().map(|key| key.to_string()));
    keys
}
