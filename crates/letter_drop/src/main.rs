fn main() {
    letter_drop::run();
}
