pub mod configuration;

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod math {
    pub mod function {
        pub mod functionpoint;
        pub mod tabulatedfunctionerror;
        pub mod tabulatedfunction;
        pub mod arraytabulatedfunction;
        pub mod linkedlisttabulatedfunction;
        pub mod anytabulatedfunction;
        pub mod tabulatedfunctionmanager;
    }
}
