fn main() {
  println!("{}", commentary_utils::settings::config_docs())
}
