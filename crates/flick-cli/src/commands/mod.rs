pub mod replay_ops;
pub mod settings_ops;
pub mod user_dict_ops;
