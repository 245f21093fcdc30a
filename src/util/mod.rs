pub mod rank_vec;
