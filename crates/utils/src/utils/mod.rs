use rand::{distributions::Alphanumeric, thread_rng, Rng};

pub mod validation;

pub fn generate_random_string() -> String {
  thread_rng()
    .sample_iter(&Alphanumeric)
    .map(char::from)
    .take(30)
    .collect()
}
