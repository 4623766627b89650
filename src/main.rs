fn main() {
    pasteboard_lib::run()
}
