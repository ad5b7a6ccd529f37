// Copyright (c) 2026 Quillpress Contributors
// SPDX-License-Identifier: Apache-2.0

fn main() {
    let protoc = protoc_bin_vendored::protoc_bin_path().expect("failed to find protoc");
    std::env::set_var("PROTOC", protoc);

    // The gateway serializes RPC responses straight to JSON, so every
    // generated message carries serde derives with the camelCase wire names.
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .type_attribute(".", "#[derive(serde::Serialize, serde::Deserialize)]")
        .type_attribute(".", "#[serde(rename_all = \"camelCase\", default)]")
        .compile_protos(
            &[
                "proto/identity.proto",
                "proto/content.proto",
                "proto/annotation.proto",
            ],
            &["proto"],
        )
        .expect("failed to compile quillpress protos");
}
