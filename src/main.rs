fn main() {
    composely_lib::run()
}
