use std::fs;
use std::path::Path;

// Embeds the Trunk output of the frontend. Without a frontend build the
// committed placeholder page under static/dist is served instead.
fn main() {
    let bundle = Path::new("../frontend/dist");
    let static_root = Path::new("static");
    let embedded = static_root.join("dist");

    println!("cargo:rerun-if-changed=../frontend/dist");

    if !bundle.join("index.html").exists() {
        return;
    }

    if embedded.exists() {
        fs::remove_dir_all(&embedded).expect("remove stale static/dist");
    }
    fs::create_dir_all(static_root).expect("create static directory");

    let options = fs_extra::dir::CopyOptions::new()
        .overwrite(true)
        .copy_inside(true);
    fs_extra::dir::copy(bundle, static_root, &options).expect("copy frontend bundle");
}
