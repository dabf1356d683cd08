fn main() {
    // Only try to embed resources on Windows
    #[cfg(target_os = "windows")]
    {
        if let Err(e) = (|| -> Result<(), Box<dyn std::error::Error>> {
            // Version info visible in the file properties of rdp-exec.exe
            let mut res = winres::WindowsResource::new();
            res.set("FileDescription", "rdp-exec guest command launcher");
            res.set("ProductName", "rdp-exec");
            res.set("OriginalFilename", "rdp-exec.exe");
            res.compile()?;
            Ok(())
        })() {
            println!("cargo:warning=Failed to embed Windows resources: {}", e);
        }
    }
    println!("cargo:rerun-if-changed=build.rs");
}
