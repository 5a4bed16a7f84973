fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "grpc")]
    {
        tonic_prost_build::configure()
            .build_client(true)
            .build_server(true)
            .compile_protos(&["proto/catalog.proto"], &["proto"])?;
    }

    println!("cargo:rerun-if-changed=proto/catalog.proto");
    println!("cargo:rerun-if-changed=build.rs");

    Ok(())
}
