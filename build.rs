fn main() {
    // Generate the sample store record types
    protobuf_codegen::Codegen::new()
        .pure()
        .includes(["src/store/protos"])
        .input("src/store/protos/sample_record.proto")
        .cargo_out_dir("sample-protos")
        .run_from_script();
}
