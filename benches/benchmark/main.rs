use criterion::criterion_main;

mod common;
mod codec;
mod scope;


#[cfg(all(feature = "json", feature = "async"))]
criterion_main!(
    codec::codec_benches,
    scope::scope_benches,
    binding::binding_benches,
    boundary::boundary_benches,
    async_ops::async_ops_benches,
);

#[cfg(all(feature = "json", not(feature = "async")))]
criterion_main!(
    codec::codec_benches,
    scope::scope_benches,
    binding::binding_benches,
    boundary::boundary_benches,
);

#[cfg(all(feature = "async", not(feature = "json")))]
criterion_main!(
    codec::codec_benches,
    scope::scope_benches,
    binding::binding_benches,
    async_ops::async_ops_benches,
);

#[cfg(not(any(feature = "json", feature = "async")))]
criterion_main!(codec::codec_benches, scope::scope_benches, binding::binding_benches);
