use config::Config;

fn main() {
    let settings = Config::builder()
        .add_source(config::File::with_name("../Settings"))
        .add_source(config::Environment::with_prefix("GLOBE"))
        .build()
        .unwrap();

    println!(
        "cargo::rustc-env=GLOBE_window_title={}",
        settings.get_string("window_title").unwrap()
    );
}
