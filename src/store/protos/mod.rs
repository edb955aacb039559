include!(concat!(env!("OUT_DIR"), "/sample-protos/mod.rs"));
