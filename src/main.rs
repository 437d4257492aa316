fn main() -> std::process::ExitCode {
    letsdog_lib::run()
}
