pub mod hex;
pub mod hex_fixed_vec;
pub mod hex_var_list;
