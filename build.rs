fn main() {
    // Host builds (tests, fuzzing) have no ESP-IDF environment to forward.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
