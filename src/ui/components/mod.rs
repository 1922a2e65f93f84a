pub mod choice_list;
