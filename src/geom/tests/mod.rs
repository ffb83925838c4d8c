mod test_core_basic;
mod test_mesh_sanity;
